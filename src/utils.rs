pub mod fold_case;
