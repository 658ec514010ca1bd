//! A scripted automation surface modelling a tiny "Your listings" page.

use crate::selectors;
use async_trait::async_trait;
use relister_core::listing::{ItemFields, VehicleFields};
use relister_core::{AutomationSurface, Error, ListingDetails, ListingRecord, Locator, Result};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Find(Locator),
    Click(Locator),
    SendKeys(Locator, String),
    Clear(Locator),
    Upload(Locator, String),
    Scroll(Locator),
    WaitPresent(Locator),
    WaitInvisible(Locator),
    Navigate(String),
}

#[derive(Default)]
struct State {
    calls: Vec<Call>,
    live: Vec<String>,
    search: String,
    selected: Option<String>,
    /// Field values typed or picked into the open create form
    draft: HashMap<String, String>,
    open_select: Option<String>,
}

/// Form fields the fake remembers while a listing is being drafted
const DRAFT_TEXT_FIELDS: [&str; 3] = ["Title", "Make", "Model"];
const DRAFT_SELECT_FIELDS: [&str; 1] = ["Year"];

/// Text of a `Locator::span_text` option
fn span_label(locator: &Locator) -> Option<String> {
    let Locator::XPath(path) = locator else {
        return None;
    };
    path.strip_prefix("//span[text()=\"")?
        .strip_suffix("\"]")
        .map(String::from)
}

impl State {
    /// Title the marketplace shows for the drafted listing
    fn draft_title(&self) -> Option<String> {
        if let Some(title) = self.draft.get("Title") {
            return Some(title.clone());
        }
        let part = |field: &str| self.draft.get(field).cloned();
        Some(format!("{} {} {}", part("Year")?, part("Make")?, part("Model")?))
    }
}

/// Every element is present unless marked absent. Listing search results
/// only appear for titles that are live, deletes remove the selected listing
/// and publishing makes the drafted title live. A drafted vehicle is titled
/// "{Year} {Make} {Model}" the way the marketplace shows it.
#[derive(Default)]
pub struct FakeSurface {
    absent: HashSet<Locator>,
    stuck_visible: HashSet<Locator>,
    state: Mutex<State>,
}

impl FakeSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without(mut self, locator: Locator) -> Self {
        self.absent.insert(locator);
        self
    }

    pub fn stuck_visible(mut self, locator: Locator) -> Self {
        self.stuck_visible.insert(locator);
        self
    }

    pub fn with_live(self, title: &str) -> Self {
        self.state.lock().unwrap().live.push(title.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clicks(&self) -> Vec<Locator> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Click(locator) => Some(locator),
                _ => None,
            })
            .collect()
    }

    pub fn writes(&self) -> Vec<(Locator, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::SendKeys(locator, text) => Some((locator, text)),
                _ => None,
            })
            .collect()
    }

    pub fn wrote_to(&self, locator: &Locator) -> bool {
        self.writes().iter().any(|(l, _)| l == locator)
    }

    /// Index of the first click on `locator`
    pub fn click_index(&self, locator: &Locator) -> Option<usize> {
        self.calls()
            .iter()
            .position(|call| *call == Call::Click(locator.clone()))
    }

    /// Indices of every click on `locator`
    pub fn click_indices(&self, locator: &Locator) -> Vec<usize> {
        self.calls()
            .iter()
            .enumerate()
            .filter(|(_, call)| **call == Call::Click(locator.clone()))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn live(&self) -> Vec<String> {
        self.state.lock().unwrap().live.clone()
    }

    fn is_present(&self, locator: &Locator, state: &State) -> bool {
        if self.absent.contains(locator) {
            return false;
        }
        if !state.search.is_empty() && *locator == Locator::span_text(&state.search) {
            return state.live.contains(&state.search);
        }
        true
    }

    fn interact(&self, locator: &Locator, call: Call) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !self.is_present(locator, &state) {
            return Err(Error::ElementNotFound {
                locator: locator.to_string(),
                waited: Duration::ZERO,
            });
        }
        state.calls.push(call);
        Ok(())
    }
}

#[async_trait]
impl AutomationSurface for FakeSurface {
    async fn find_element(&self, locator: &Locator, required: bool, timeout: Duration) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Find(locator.clone()));
        let present = self.is_present(locator, &state);
        if !present && required {
            return Err(Error::ElementNotFound {
                locator: locator.to_string(),
                waited: timeout,
            });
        }
        Ok(present)
    }

    async fn click(&self, locator: &Locator) -> Result<()> {
        self.interact(locator, Call::Click(locator.clone()))?;

        let mut state = self.state.lock().unwrap();
        let confirm_css = Locator::css(selectors::CONFIRM_DELETE);
        let confirm_xpath = Locator::xpath(selectors::CONFIRM_DELETE_BUTTON_TEXT);

        if *locator == Locator::span_text(&state.search) && state.live.contains(&state.search) {
            state.selected = Some(state.search.clone());
        } else if *locator == confirm_css || *locator == confirm_xpath {
            if let Some(title) = state.selected.take() {
                state.live.retain(|t| *t != title);
            }
        } else if *locator == Locator::css(selectors::PUBLISH_BUTTON) {
            if let Some(title) = state.draft_title() {
                state.live.push(title);
            }
            state.draft.clear();
        } else if let Some(field) = DRAFT_SELECT_FIELDS
            .iter()
            .find(|f| *locator == selectors::field_label(f))
        {
            state.open_select = Some(field.to_string());
        } else if let Some(field) = state.open_select.take() {
            if let Some(value) = span_label(locator) {
                state.draft.insert(field, value);
            }
        }
        Ok(())
    }

    async fn send_keys(&self, locator: &Locator, text: &str) -> Result<()> {
        self.interact(locator, Call::SendKeys(locator.clone(), text.to_string()))?;

        let mut state = self.state.lock().unwrap();
        if *locator == Locator::css(selectors::SEARCH_YOUR_LISTINGS) {
            state.search = text.to_string();
        } else if let Some(field) = DRAFT_TEXT_FIELDS
            .iter()
            .find(|f| *locator == selectors::field_input(f))
        {
            state.draft.insert(field.to_string(), text.to_string());
        }
        Ok(())
    }

    async fn clear_text(&self, locator: &Locator) -> Result<()> {
        self.interact(locator, Call::Clear(locator.clone()))?;

        if *locator == Locator::css(selectors::SEARCH_YOUR_LISTINGS) {
            self.state.lock().unwrap().search.clear();
        }
        Ok(())
    }

    async fn upload_files(&self, locator: &Locator, paths: &str) -> Result<()> {
        self.interact(locator, Call::Upload(locator.clone(), paths.to_string()))
    }

    async fn scroll_into_view(&self, locator: &Locator) -> Result<()> {
        self.interact(locator, Call::Scroll(locator.clone()))
    }

    async fn wait_until_present(&self, locator: &Locator, timeout: Duration) -> Result<()> {
        self.find_element(locator, true, timeout).await?;
        let mut state = self.state.lock().unwrap();
        if let Some(last) = state.calls.last_mut() {
            *last = Call::WaitPresent(locator.clone());
        }
        Ok(())
    }

    async fn wait_until_invisible(&self, locator: &Locator, _timeout: Duration) -> Result<bool> {
        self.state
            .lock()
            .unwrap()
            .calls
            .push(Call::WaitInvisible(locator.clone()));
        Ok(!self.stuck_visible.contains(locator))
    }

    async fn navigate(&self, url: &str) -> Result<()> {
        self.state
            .lock()
            .unwrap()
            .calls
            .push(Call::Navigate(url.to_string()));
        Ok(())
    }
}

pub fn item_record(title: &str) -> ListingRecord {
    ListingRecord {
        photos_folder: PathBuf::from("/photos/kayak"),
        photos_names: vec!["1.jpg".to_string(), " 2.jpg".to_string()],
        price: "35".to_string(),
        description: format!("{} for rent", title),
        location: "Austin, TX".to_string(),
        delivery: 20.0,
        groups: None,
        equipment: vec![],
        details: ListingDetails::Item(ItemFields {
            title: title.to_string(),
            category: "Miscellaneous".to_string(),
            condition: "Used - Like New".to_string(),
            brand: None,
        }),
    }
}

pub fn vehicle_record(year: &str, make: &str, model: &str) -> ListingRecord {
    ListingRecord {
        photos_folder: PathBuf::from("/photos/car"),
        photos_names: vec!["front.jpg".to_string()],
        price: "9000".to_string(),
        description: "Runs great".to_string(),
        location: "Dallas, TX".to_string(),
        delivery: 0.0,
        groups: None,
        equipment: vec![],
        details: ListingDetails::Vehicle(VehicleFields {
            vehicle_type: "Car/Truck".to_string(),
            year: year.to_string(),
            make: make.to_string(),
            model: model.to_string(),
            mileage: "42000".to_string(),
            fuel_type: "Gasoline".to_string(),
        }),
    }
}
