// Menu flow: the operation descriptors behind each numbered menu and
// the navigation loop that connects the console to the store. Handlers
// never terminate the process themselves; they hand a flow result back
// to the loop, which owns that decision.

use anyhow::Result;
use serde_json::{Map, Value};

use crate::stats::EntitySummary;
use crate::store::InfoStore;
use crate::ui::{Choice, Ui};

const GREETING: &str = "This is a SpaceX info app";
const CHOOSE_ACTION: &str = "\nChoose an action by typing a number and pressing [ENTER]:";
const CHOOSE_LAUNCHPAD: &str = "\nChoose a launchpad by typing a number and pressing [ENTER]:";
const CHOOSE_ROCKET: &str = "\nChoose a rocket by typing a number and pressing [ENTER]:";
const CHOOSE_DATE: &str = "Choose a launch date by typing a number and pressing [ENTER]:";
const INVALID_INPUT: &str = "Input was not valid, please enter a valid number!";

/// Top-level operations, dispatched by `match` on the chosen entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainAction {
    AboutCompany,
    BrowseLaunches,
    BrowseLaunchpads,
    BrowseRockets,
    LaunchStats,
}

const MAIN_MENU: [(&str, MainAction); 5] = [
    ("About company", MainAction::AboutCompany),
    ("Browse launches", MainAction::BrowseLaunches),
    ("Browse launchpads", MainAction::BrowseLaunchpads),
    ("Browse rockets", MainAction::BrowseRockets),
    ("Show launch statistics", MainAction::LaunchStats),
];

/// What a handler wants the navigation loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Launch list filters offered in the launches submenu. The entity
/// variants carry the id they restrict the list to.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LaunchFilter {
    All,
    Successful,
    Failed,
    ByRocket(String),
    ByLaunchpad(String),
}

impl LaunchFilter {
    /// The field/value criteria handed to `InfoStore::filter_launches`.
    fn criteria(&self) -> Map<String, Value> {
        let mut criteria = Map::new();
        match self {
            LaunchFilter::All => {}
            LaunchFilter::Successful => {
                criteria.insert("success".to_string(), Value::Bool(true));
            }
            LaunchFilter::Failed => {
                criteria.insert("success".to_string(), Value::Bool(false));
            }
            LaunchFilter::ByRocket(id) => {
                criteria.insert("rocket".to_string(), Value::String(id.clone()));
            }
            LaunchFilter::ByLaunchpad(id) => {
                criteria.insert("launchpad".to_string(), Value::String(id.clone()));
            }
        }
        criteria
    }
}

/// Run the interactive loop until the user asks to exit.
pub fn run(store: &InfoStore, ui: &Ui) -> Result<()> {
    ui.say(GREETING);
    let labels: Vec<&str> = MAIN_MENU.iter().map(|(label, _)| *label).collect();
    loop {
        let flow = match ui.ask_choice(CHOOSE_ACTION, &labels, None, true)? {
            Choice::Exit => Flow::Exit,
            Choice::Invalid => {
                ui.say(INVALID_INPUT);
                Flow::Continue
            }
            Choice::Index(index) => match MAIN_MENU[index].1 {
                MainAction::AboutCompany => about_company(store, ui)?,
                MainAction::BrowseLaunches => browse_launches(store, ui)?,
                MainAction::BrowseLaunchpads => browse_launchpads(store, ui)?,
                MainAction::BrowseRockets => browse_rockets(store, ui)?,
                MainAction::LaunchStats => show_stats(store, ui),
            },
        };
        if flow == Flow::Exit {
            ui.say("Bye!");
            return Ok(());
        }
    }
}

fn about_company(store: &InfoStore, ui: &Ui) -> Result<Flow> {
    let company = store.get("company")?;
    ui.show_company(&company);
    Ok(Flow::Continue)
}

/// The launches submenu: the fixed filters first, then one entry per
/// rocket and per launchpad known to the store.
fn launch_menu(store: &InfoStore) -> Vec<(String, LaunchFilter)> {
    let mut menu = vec![
        ("All".to_string(), LaunchFilter::All),
        ("Successful".to_string(), LaunchFilter::Successful),
        ("Failed".to_string(), LaunchFilter::Failed),
    ];
    for (id, summary) in store.rocket_summaries() {
        menu.push((
            format!("By {} rocket", summary.name),
            LaunchFilter::ByRocket(id.clone()),
        ));
    }
    for (id, summary) in store.launchpad_summaries() {
        menu.push((
            format!("By {}", summary.name),
            LaunchFilter::ByLaunchpad(id.clone()),
        ));
    }
    menu
}

fn browse_launches(store: &InfoStore, ui: &Ui) -> Result<Flow> {
    let menu = launch_menu(store);
    let labels: Vec<&str> = menu.iter().map(|(label, _)| label.as_str()).collect();
    loop {
        let filter = match ui.ask_choice(CHOOSE_ACTION, &labels, None, true)? {
            Choice::Exit => return Ok(Flow::Exit),
            Choice::Invalid => {
                ui.say(INVALID_INPUT);
                continue;
            }
            Choice::Index(index) => &menu[index].1,
        };
        let filtered = store.filter_launches(&filter.criteria())?;
        if filtered.is_empty() {
            ui.separator();
            ui.say("No launches found!");
            ui.separator();
            return Ok(Flow::Continue);
        }

        let dates: Vec<String> = filtered.iter().map(launch_date_label).collect();
        match ui.ask_choice(CHOOSE_DATE, &dates, None, true)? {
            Choice::Exit => return Ok(Flow::Exit),
            Choice::Invalid => ui.say(INVALID_INPUT),
            Choice::Index(index) => {
                let launch = &filtered[index];
                let rocket_name = launch
                    .get("rocket")
                    .and_then(Value::as_str)
                    .and_then(|id| store.rocket_summary(id))
                    .map(|summary| summary.name.as_str());
                ui.show_launch(launch, rocket_name);
                return Ok(Flow::Continue);
            }
        }
    }
}

fn browse_launchpads(store: &InfoStore, ui: &Ui) -> Result<Flow> {
    let launchpads = store.get("launchpads")?;
    match pick_entity(ui, CHOOSE_LAUNCHPAD, store.launchpad_summaries())? {
        EntityChoice::Exit => Ok(Flow::Exit),
        EntityChoice::None => Ok(Flow::Continue),
        EntityChoice::Id(id) => {
            if let Some(record) = find_record(&launchpads, &id) {
                ui.show_launchpad(record);
            }
            Ok(Flow::Continue)
        }
    }
}

fn browse_rockets(store: &InfoStore, ui: &Ui) -> Result<Flow> {
    let rockets = store.get("rockets")?;
    match pick_entity(ui, CHOOSE_ROCKET, store.rocket_summaries())? {
        EntityChoice::Exit => Ok(Flow::Exit),
        EntityChoice::None => Ok(Flow::Continue),
        EntityChoice::Id(id) => {
            if let Some(record) = find_record(&rockets, &id) {
                let rate = store.rocket_summary(&id).and_then(EntitySummary::success_rate);
                ui.show_rocket(record, rate);
            }
            Ok(Flow::Continue)
        }
    }
}

fn show_stats(store: &InfoStore, ui: &Ui) -> Flow {
    let stats = store.stats();
    ui.show_launch_stats(&stats.yearly(), &stats.monthly());
    Flow::Continue
}

enum EntityChoice {
    Id(String),
    Exit,
    None,
}

/// Offer the summaries by name and return the id of the picked one.
fn pick_entity(
    ui: &Ui,
    prompt: &str,
    summaries: &[(String, EntitySummary)],
) -> Result<EntityChoice> {
    let labels: Vec<&str> = summaries
        .iter()
        .map(|(_, summary)| summary.name.as_str())
        .collect();
    match ui.ask_choice(prompt, &labels, None, true)? {
        Choice::Exit => Ok(EntityChoice::Exit),
        Choice::Invalid => {
            ui.say(INVALID_INPUT);
            Ok(EntityChoice::None)
        }
        Choice::Index(index) => Ok(EntityChoice::Id(summaries[index].0.clone())),
    }
}

fn find_record<'a>(collection: &'a Value, id: &str) -> Option<&'a Value> {
    collection
        .as_array()?
        .iter()
        .find(|record| record.get("id").and_then(Value::as_str) == Some(id))
}

/// The launch's local calendar date, used as its menu label.
fn launch_date_label(launch: &Value) -> String {
    launch
        .get("date_local")
        .and_then(Value::as_str)
        .map(|date| date.split('T').next().unwrap_or(date).to_string())
        .unwrap_or_else(|| "unknown date".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{InfoProvider, ProviderError};
    use serde_json::json;
    use tempfile::TempDir;

    struct FixtureProvider;

    impl InfoProvider for FixtureProvider {
        fn company(&self) -> Result<Value, ProviderError> {
            Ok(json!({"name": "SpaceX"}))
        }

        fn launches(&self) -> Result<Value, ProviderError> {
            Ok(json!([
                {"id": "l1", "success": true, "rocket": "rk-1", "launchpad": "lp-1",
                 "date_utc": "2020-01-15T10:00:00.000Z", "date_local": "2020-01-15T02:00:00-08:00"}
            ]))
        }

        fn launchpads(&self) -> Result<Value, ProviderError> {
            Ok(json!([{"id": "lp-1", "name": "VAFB", "full_name": "Vandenberg SLC 3W"}]))
        }

        fn rockets(&self) -> Result<Value, ProviderError> {
            Ok(json!([
                {"id": "rk-1", "name": "Falcon 1"},
                {"id": "rk-2", "name": "Falcon 9"}
            ]))
        }
    }

    fn fetched_store() -> (TempDir, InfoStore) {
        let dir = TempDir::new().unwrap();
        let mut store = InfoStore::new(dir.path());
        store.fetch_all(&FixtureProvider).unwrap();
        (dir, store)
    }

    #[test]
    fn test_filter_criteria_mapping() {
        assert!(LaunchFilter::All.criteria().is_empty());

        let successful = LaunchFilter::Successful.criteria();
        assert_eq!(successful.get("success"), Some(&Value::Bool(true)));

        let failed = LaunchFilter::Failed.criteria();
        assert_eq!(failed.get("success"), Some(&Value::Bool(false)));

        let by_rocket = LaunchFilter::ByRocket("rk-2".to_string()).criteria();
        assert_eq!(by_rocket.get("rocket"), Some(&json!("rk-2")));

        let by_pad = LaunchFilter::ByLaunchpad("lp-1".to_string()).criteria();
        assert_eq!(by_pad.get("launchpad"), Some(&json!("lp-1")));
    }

    #[test]
    fn test_launch_menu_lists_filters_then_entities() {
        let (_dir, store) = fetched_store();

        let menu = launch_menu(&store);
        let labels: Vec<&str> = menu.iter().map(|(label, _)| label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "All",
                "Successful",
                "Failed",
                "By Falcon 1 rocket",
                "By Falcon 9 rocket",
                "By Vandenberg SLC 3W",
            ]
        );
        assert_eq!(menu[3].1, LaunchFilter::ByRocket("rk-1".to_string()));
        assert_eq!(menu[5].1, LaunchFilter::ByLaunchpad("lp-1".to_string()));
    }

    #[test]
    fn test_find_record_by_id() {
        let (_dir, store) = fetched_store();

        let rockets = store.get("rockets").unwrap();
        let record = find_record(&rockets, "rk-2").unwrap();
        assert_eq!(record["name"], json!("Falcon 9"));
        assert!(find_record(&rockets, "rk-9").is_none());
    }

    #[test]
    fn test_launch_date_label_uses_the_local_date() {
        let launch = json!({"date_local": "2020-01-15T02:00:00-08:00"});
        assert_eq!(launch_date_label(&launch), "2020-01-15");

        let dateless = json!({"name": "no clock aboard"});
        assert_eq!(launch_date_label(&dateless), "unknown date");
    }
}
