//! Ready-made masks and pipes for common inputs.
pub mod date_pipe;
pub mod number_mask;

pub use date_pipe::{AutoCorrectedDatePipe, DatePipeOptions, create_auto_corrected_date_pipe};
pub use number_mask::{NumberMaskOptions, create_number_mask};
