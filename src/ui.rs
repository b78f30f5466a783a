// Console view: plain-text rendering and the numbered choice prompt.
// Holds no data of its own; the menu layer passes in everything it
// wants shown.

use anyhow::Result;
use dialoguer::Input;
use serde_json::Value;

/// Outcome of a numbered-choice prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Index(usize),
    Exit,
    Invalid,
}

/// Lists with at least this many items are printed in three columns.
const COLUMN_LIMIT: usize = 10;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const COMPANY_PROPERTIES: [&str; 6] = ["name", "founded", "summary", "employees", "vehicles", "ceo"];
const LAUNCHPAD_PROPERTIES: [&str; 7] = [
    "full_name",
    "locality",
    "region",
    "status",
    "launch_successes",
    "launch_attempts",
    "details",
];
const ROCKET_PROPERTIES: [&str; 5] = ["name", "type", "active", "stages", "description"];
const LAUNCH_PROPERTIES: [&str; 7] = [
    "date_local",
    "flight_number",
    "name",
    "success",
    "reused",
    "landing_success",
    "details",
];

#[derive(Debug, Default)]
pub struct Ui;

impl Ui {
    pub fn new() -> Self {
        Ui
    }

    pub fn say(&self, message: &str) {
        println!("{message}");
    }

    pub fn separator(&self) {
        println!("=============================================");
    }

    /// Print a numbered list of labels and read the user's pick.
    ///
    /// Empty input resolves to `default` when one is given; the `e`
    /// sentinel requests an exit when `allow_exit` is set. Anything
    /// else that is not an in-range index comes back as
    /// [`Choice::Invalid`] for the caller to handle.
    pub fn ask_choice<S: AsRef<str>>(
        &self,
        prompt: &str,
        labels: &[S],
        default: Option<usize>,
        allow_exit: bool,
    ) -> Result<Choice> {
        self.say(prompt);
        for line in choice_lines(labels, default) {
            self.say(&line);
        }
        if allow_exit {
            self.say("To exit: please type 'e'");
        }
        let answer: String = Input::new().with_prompt(">").allow_empty(true).interact_text()?;
        Ok(parse_choice(answer.trim(), labels.len(), default, allow_exit))
    }

    pub fn show_company(&self, company: &Value) {
        self.show_details("Company information", company, &COMPANY_PROPERTIES);
    }

    pub fn show_launchpad(&self, launchpad: &Value) {
        self.show_details("Launchpad information", launchpad, &LAUNCHPAD_PROPERTIES);
    }

    pub fn show_rocket(&self, rocket: &Value, success_rate: Option<f64>) {
        self.separator();
        self.say("Rocket information");
        self.separator();
        for property in ROCKET_PROPERTIES {
            self.say(&field_line(rocket, property));
        }
        if let Some(rate) = success_rate {
            self.say(&format!("Rocket success rate: {rate:.1}%"));
        }
        self.separator();
    }

    pub fn show_launch(&self, launch: &Value, rocket_name: Option<&str>) {
        self.separator();
        self.say("Launch information");
        self.separator();
        if let Some(name) = rocket_name {
            self.say(&format!("Rocket: {name}"));
        }
        for property in LAUNCH_PROPERTIES {
            self.say(&field_line(launch, property));
        }
        self.separator();
    }

    /// Two-row tables of the year and month launch counts.
    pub fn show_launch_stats(&self, yearly: &[(i32, u32)], monthly: &[(u32, u32)]) {
        self.say("Statistics by years:");
        let mut titles = String::from("|");
        let mut values = String::from("|");
        for (year, count) in yearly {
            titles.push_str(&format!("{year}|"));
            values.push_str(&format!("{count:<4}|"));
        }
        self.say(&titles);
        self.say(&values);

        self.say("Statistics by months:");
        let mut titles = String::from("|");
        let mut values = String::from("|");
        for (month, count) in monthly {
            titles.push_str(&format!("{:<4}|", month_name(*month)));
            values.push_str(&format!("{count:<4}|"));
        }
        self.say(&titles);
        self.say(&values);
    }

    fn show_details(&self, title: &str, record: &Value, properties: &[&str]) {
        self.separator();
        self.say(title);
        self.separator();
        for property in properties {
            self.say(&field_line(record, property));
        }
        self.separator();
    }
}

/// Interpret one line of input against a list of `len` labels.
fn parse_choice(answer: &str, len: usize, default: Option<usize>, allow_exit: bool) -> Choice {
    if let Ok(index) = answer.parse::<usize>() {
        if index < len {
            return Choice::Index(index);
        }
        return Choice::Invalid;
    }
    if answer.is_empty() {
        if let Some(index) = default {
            return Choice::Index(index);
        }
    }
    if allow_exit && answer == "e" {
        return Choice::Exit;
    }
    Choice::Invalid
}

/// Lay the numbered entries out for display: one per line for short
/// lists, three aligned columns once the list reaches `COLUMN_LIMIT`.
fn choice_lines<S: AsRef<str>>(labels: &[S], default: Option<usize>) -> Vec<String> {
    let entries: Vec<String> = labels
        .iter()
        .enumerate()
        .map(|(index, label)| {
            if Some(index) == default {
                format!("{index}: {} [default]", label.as_ref())
            } else {
                format!("{index}: {}", label.as_ref())
            }
        })
        .collect();
    if entries.len() < COLUMN_LIMIT {
        return entries;
    }

    let width = entries.iter().map(String::len).max().unwrap_or(0) + 1;
    entries
        .chunks(3)
        .map(|row| {
            row.iter()
                .map(|entry| format!("{entry:<width$}"))
                .collect::<String>()
        })
        .collect()
}

fn field_line(record: &Value, property: &str) -> String {
    format!("{}: {}", field_label(property), field_value(record, property))
}

/// `launch_attempts` -> `Launch attempts`.
fn field_label(property: &str) -> String {
    let spaced = property.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => spaced,
    }
}

fn field_value(record: &Value, property: &str) -> String {
    match record.get(property) {
        None | Some(Value::Null) => "n/a".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("?")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_choice_accepts_in_range_indices() {
        assert_eq!(parse_choice("0", 3, None, false), Choice::Index(0));
        assert_eq!(parse_choice("2", 3, None, false), Choice::Index(2));
        assert_eq!(parse_choice("3", 3, None, false), Choice::Invalid);
    }

    #[test]
    fn test_parse_choice_exit_sentinel() {
        assert_eq!(parse_choice("e", 3, None, true), Choice::Exit);
        // The sentinel only works where an exit is offered.
        assert_eq!(parse_choice("e", 3, None, false), Choice::Invalid);
    }

    #[test]
    fn test_parse_choice_empty_input_uses_default() {
        assert_eq!(parse_choice("", 3, Some(1), true), Choice::Index(1));
        assert_eq!(parse_choice("", 3, None, true), Choice::Invalid);
    }

    #[test]
    fn test_parse_choice_rejects_junk() {
        assert_eq!(parse_choice("launch", 3, None, true), Choice::Invalid);
        assert_eq!(parse_choice("-1", 3, None, true), Choice::Invalid);
    }

    #[test]
    fn test_choice_lines_single_column_below_limit() {
        let labels = ["All", "Successful", "Failed"];
        let lines = choice_lines(&labels, None);
        assert_eq!(lines, vec!["0: All", "1: Successful", "2: Failed"]);
    }

    #[test]
    fn test_choice_lines_marks_the_default() {
        let labels = ["All", "Successful"];
        let lines = choice_lines(&labels, Some(0));
        assert_eq!(lines[0], "0: All [default]");
        assert_eq!(lines[1], "1: Successful");
    }

    #[test]
    fn test_choice_lines_three_columns_at_limit() {
        let labels: Vec<String> = (0..11).map(|i| format!("item{i}")).collect();
        let lines = choice_lines(&labels, None);

        // 11 entries fold into three rows of 3 + 3 + 3 and one of 2.
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("0: item0"));
        assert!(lines[0].contains("1: item1"));
        assert!(lines[0].contains("2: item2"));
        assert!(lines[3].contains("9: item9"));
        assert!(lines[3].contains("10: item10"));
    }

    #[test]
    fn test_field_label_formatting() {
        assert_eq!(field_label("full_name"), "Full name");
        assert_eq!(field_label("launch_attempts"), "Launch attempts");
        assert_eq!(field_label("name"), "Name");
    }

    #[test]
    fn test_field_value_rendering() {
        let record = json!({
            "name": "Falcon 9",
            "active": true,
            "stages": 2,
            "details": null
        });
        assert_eq!(field_value(&record, "name"), "Falcon 9");
        assert_eq!(field_value(&record, "active"), "true");
        assert_eq!(field_value(&record, "stages"), "2");
        assert_eq!(field_value(&record, "details"), "n/a");
        assert_eq!(field_value(&record, "wikipedia"), "n/a");
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(1), "Jan");
        assert_eq!(month_name(12), "Dec");
        assert_eq!(month_name(13), "?");
    }
}
