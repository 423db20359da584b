#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Pipe, PipeContext, PipeOutcome};

const DAYS_IN_MONTH: [u32; 13] = [31, 31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Options of [`create_auto_corrected_date_pipe`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatePipeOptions {
    pub min_year: u32,
    pub max_year: u32,
}

impl Default for DatePipeOptions {
    fn default() -> Self {
        Self {
            min_year: 1,
            max_year: 9999,
        }
    }
}

impl DatePipeOptions {
    fn has_default_years(self) -> bool { self == Self::default() }
}

/// One part of a date format, in the order components are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum DateComponent {
    FullYear,
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl DateComponent {
    fn from_format(format: &str) -> Option<Self> {
        Some(match format {
            "yyyy" => DateComponent::FullYear,
            "yy" => DateComponent::Year,
            "mm" => DateComponent::Month,
            "dd" => DateComponent::Day,
            "HH" => DateComponent::Hour,
            "MM" => DateComponent::Minute,
            "SS" => DateComponent::Second,
            _ => return None,
        })
    }

    fn len(self) -> usize {
        match self {
            DateComponent::FullYear => 4,
            _ => 2,
        }
    }

    fn max_value(self, options: DatePipeOptions) -> u32 {
        match self {
            DateComponent::FullYear => options.max_year,
            DateComponent::Year => 99,
            DateComponent::Month => 12,
            DateComponent::Day => 31,
            DateComponent::Hour => 23,
            DateComponent::Minute | DateComponent::Second => 59,
        }
    }

    fn min_value(self, options: DatePipeOptions) -> u32 {
        match self {
            DateComponent::FullYear => options.min_year,
            DateComponent::Month | DateComponent::Day => 1,
            _ => 0,
        }
    }
}

/// Auto-corrects and validates dates typed into a date mask, see
/// [`create_auto_corrected_date_pipe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoCorrectedDatePipe {
    /// Each component with its position in the format
    components: Vec<(DateComponent, usize)>,
    options: DatePipeOptions,
}

/// A pipe for date masks such as `99/99/9999`, described by a format like
/// `mm/dd/yyyy`. Supported components are `yyyy`, `yy`, `mm`, `dd`, `HH`,
/// `MM` and `SS`, separated by any other characters.
///
/// A first digit that cannot start a valid component is moved one position
/// right behind a `0`, so typing `4` into a month yields `04`. Values that
/// can no longer become a valid date, like a 13th month or the 30th of
/// February, are rejected.
#[must_use]
pub fn create_auto_corrected_date_pipe(
    date_format: &str,
    options: DatePipeOptions,
) -> AutoCorrectedDatePipe {
    let mut components: Vec<(DateComponent, usize)> = date_format
        .split(|c: char| !matches!(c, 'd' | 'm' | 'y' | 'H' | 'M' | 'S'))
        .filter_map(DateComponent::from_format)
        .filter_map(|component| Some((component, format_position(date_format, component)?)))
        .collect();
    components.sort_by_key(|(component, _)| *component);

    AutoCorrectedDatePipe {
        components,
        options,
    }
}

/// Character index of the first occurrence of the component in the format.
fn format_position(date_format: &str, component: DateComponent) -> Option<usize> {
    let needle: &str = match component {
        DateComponent::FullYear => "yyyy",
        DateComponent::Year => "yy",
        DateComponent::Month => "mm",
        DateComponent::Day => "dd",
        DateComponent::Hour => "HH",
        DateComponent::Minute => "MM",
        DateComponent::Second => "SS",
    };
    let byte_index = date_format.find(needle)?;
    Some(date_format[..byte_index].chars().count())
}

impl AutoCorrectedDatePipe {
    fn is_invalid(&self, conformed: &[char]) -> bool {
        let mut month = 0;

        self.components.iter().any(|&(component, position)| {
            let text: String = conformed
                .iter()
                .skip(position)
                .take(component.len())
                .filter(|c| c.is_ascii_digit())
                .collect();
            let value = text.parse::<u32>().ok();

            if component == DateComponent::Month {
                month = value.unwrap_or(0);
            }

            let Some(value) = value else {
                return false;
            };

            if component == DateComponent::FullYear && !self.options.has_default_years() {
                // Only the digits typed so far are compared
                return scoped(self.options.min_year, text.len()).is_some_and(|min| value < min)
                    || scoped(self.options.max_year, text.len()).is_some_and(|max| value > max);
            }

            let max_value = if component == DateComponent::Day {
                usize::try_from(month)
                    .ok()
                    .and_then(|month| DAYS_IN_MONTH.get(month))
                    .copied()
                    .unwrap_or(DAYS_IN_MONTH[0])
            } else {
                component.max_value(self.options)
            };

            value > max_value
                || (text.len() == component.len() && value < component.min_value(self.options))
        })
    }
}

/// The leading `digits` digits of `bound`.
fn scoped(bound: u32, digits: usize) -> Option<u32> {
    let text = bound.to_string();
    text.get(..digits.min(text.len()))?.parse().ok()
}

impl Pipe for AutoCorrectedDatePipe {
    fn transform(&self, conformed_value: &str, _: &PipeContext<'_>) -> PipeOutcome {
        let conformed: Vec<char> = conformed_value.chars().collect();
        let mut corrected = conformed.clone();
        let mut indexes_of_piped_chars = Vec::new();

        for &(component, position) in &self.components {
            let max_first_digit = scoped(component.max_value(self.options), 1);
            let first_digit = conformed.get(position).and_then(|c| c.to_digit(10));

            let needs_padding = matches!(
                (first_digit, max_first_digit),
                (Some(first_digit), Some(max_first_digit)) if first_digit > max_first_digit
            );

            if needs_padding {
                let digit = corrected[position];
                if position + 1 < corrected.len() {
                    corrected[position + 1] = digit;
                } else {
                    corrected.push(digit);
                }
                corrected[position] = '0';
                indexes_of_piped_chars.push(position);
            }
        }

        if self.is_invalid(&conformed) {
            return PipeOutcome::Rejected;
        }

        PipeOutcome::Accepted {
            value: corrected.into_iter().collect(),
            indexes_of_piped_chars,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    const CONTEXT: PipeContext<'static> = PipeContext {
        raw_value: "",
        previous_conformed_value: None,
        placeholder: "__/__/____",
        placeholder_char: '_',
        caret_position: 0,
        guide: true,
        keep_char_positions: false,
    };

    fn accepted(value: &str, indexes_of_piped_chars: Vec<usize>) -> PipeOutcome {
        PipeOutcome::Accepted {
            value: value.to_owned(),
            indexes_of_piped_chars,
        }
    }

    fn transform(format: &str, conformed_value: &str) -> PipeOutcome {
        create_auto_corrected_date_pipe(format, DatePipeOptions::default())
            .transform(conformed_value, &CONTEXT)
    }

    #[test]
    fn test_components_are_sorted() {
        let pipe = create_auto_corrected_date_pipe("dd.mm.yyyy HH:MM", DatePipeOptions::default());

        assert_eq!(pipe.components, vec![
            (DateComponent::FullYear, 6),
            (DateComponent::Month, 3),
            (DateComponent::Day, 0),
            (DateComponent::Hour, 11),
            (DateComponent::Minute, 14),
        ]);
    }

    #[test_case("1_/__/____", accepted("1_/__/____", vec![]) ; "partial month")]
    #[test_case("4_/__/____", accepted("04/__/____", vec![0]) ; "month is padded")]
    #[test_case("12/4_/____", accepted("12/04/____", vec![3]) ; "day is padded")]
    #[test_case("13/__/____", PipeOutcome::Rejected ; "month too large")]
    #[test_case("00/__/____", PipeOutcome::Rejected ; "month too small")]
    #[test_case("02/29/2024", accepted("02/29/2024", vec![]) ; "leap day")]
    #[test_case("02/31/____", PipeOutcome::Rejected ; "february has no 31st")]
    #[test_case("04/31/____", PipeOutcome::Rejected ; "april has 30 days")]
    #[test_case("__/31/____", accepted("__/31/____", vec![]) ; "day without month")]
    fn test_month_day_year(conformed_value: &str, expected: PipeOutcome) {
        assert_eq!(transform("mm/dd/yyyy", conformed_value), expected);
    }

    #[test_case("3_:__", accepted("03:__", vec![0]) ; "hour is padded")]
    #[test_case("24:__", PipeOutcome::Rejected ; "hour too large")]
    #[test_case("23:6_", accepted("23:06", vec![3]) ; "minute is padded")]
    #[test_case("23:59", accepted("23:59", vec![]) ; "last minute of the day")]
    fn test_time(conformed_value: &str, expected: PipeOutcome) {
        assert_eq!(transform("HH:MM", conformed_value), expected);
    }

    #[test]
    fn test_padding_without_guide() {
        assert_eq!(transform("mm/dd/yyyy", "4"), accepted("04", vec![0]));
    }

    #[test]
    fn test_year_range() {
        let pipe = create_auto_corrected_date_pipe("yyyy", DatePipeOptions {
            min_year: 1900,
            max_year: 2099,
        });

        assert_eq!(pipe.transform("19__", &CONTEXT), accepted("19__", vec![]));
        assert_eq!(pipe.transform("2099", &CONTEXT), accepted("2099", vec![]));
        assert_eq!(pipe.transform("18__", &CONTEXT), PipeOutcome::Rejected);
        assert_eq!(pipe.transform("21__", &CONTEXT), PipeOutcome::Rejected);
        assert_eq!(pipe.transform("3___", &CONTEXT), PipeOutcome::Rejected);
    }
}
