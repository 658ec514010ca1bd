use crate::error::{Stage, StageContext};
use crate::plan::{FormStep, StepPlan};
use relister_core::listing::{ItemFields, VehicleFields};
use relister_core::{Category, Error, ListingDetails, ListingRecord, Result};
use std::collections::{HashMap, HashSet};

/// Builds the category-specific part of the create-listing form
pub trait FieldComposer: Send + Sync {
    fn category(&self) -> Category;

    /// Steps for this record's category fields, in form order
    fn compose(&self, record: &ListingRecord) -> Result<StepPlan>;
}

pub struct ItemComposer;

impl ItemComposer {
    fn plan(item: &ItemFields) -> Result<StepPlan> {
        let mut plan = StepPlan::new()
            .then(FormStep::text("Title", &item.title))
            .then(FormStep::select("Category", &item.category).scrolled())
            .then(FormStep::select_auto("Condition", &item.condition));

        if item.needs_brand() {
            let brand = item.brand.as_deref().ok_or_else(|| {
                Error::InvalidRecord(format!("'{}' needs a Brand for its category", item.title))
            })?;
            plan.push(FormStep::text("Brand", brand));
        }

        Ok(plan)
    }
}

impl FieldComposer for ItemComposer {
    fn category(&self) -> Category {
        Category::Item
    }

    fn compose(&self, record: &ListingRecord) -> Result<StepPlan> {
        match &record.details {
            ListingDetails::Item(item) => Self::plan(item),
            ListingDetails::Vehicle(_) => Err(wrong_details(record, Category::Item)),
        }
    }
}

pub struct VehicleComposer;

impl VehicleComposer {
    fn plan(vehicle: &VehicleFields) -> StepPlan {
        StepPlan::new()
            .then(FormStep::select("Vehicle type", &vehicle.vehicle_type))
            .then(FormStep::select("Year", &vehicle.year).scrolled())
            .then(FormStep::text("Make", &vehicle.make))
            .then(FormStep::text("Model", &vehicle.model))
            .then(FormStep::text("Mileage", &vehicle.mileage).scrolled())
            .then(FormStep::select("Fuel type", &vehicle.fuel_type))
    }
}

impl FieldComposer for VehicleComposer {
    fn category(&self) -> Category {
        Category::Vehicle
    }

    fn compose(&self, record: &ListingRecord) -> Result<StepPlan> {
        match &record.details {
            ListingDetails::Vehicle(vehicle) => Ok(Self::plan(vehicle)),
            ListingDetails::Item(_) => Err(wrong_details(record, Category::Vehicle)),
        }
    }
}

fn wrong_details(record: &ListingRecord, expected: Category) -> Error {
    Error::InvalidRecord(format!(
        "'{}' has {} fields, expected {} fields",
        record.derived_title(),
        record.category(),
        expected
    ))
}

/// Composer for each supported category
pub struct Composers {
    by_category: HashMap<Category, Box<dyn FieldComposer>>,
}

impl Composers {
    /// No composers; every category is unsupported until registered
    pub fn empty() -> Self {
        Self {
            by_category: HashMap::new(),
        }
    }

    /// Item and vehicle composers
    pub fn standard() -> Self {
        Self::empty()
            .register(Box::new(ItemComposer))
            .register(Box::new(VehicleComposer))
    }

    pub fn register(mut self, composer: Box<dyn FieldComposer>) -> Self {
        self.by_category.insert(composer.category(), composer);
        self
    }

    pub fn get(&self, category: Category) -> Option<&dyn FieldComposer> {
        self.by_category.get(&category).map(|c| c.as_ref())
    }

    /// Composer for `category`, checking that `record` belongs to it
    pub fn for_record(
        &self,
        record: &ListingRecord,
        category: Category,
    ) -> crate::Result<&dyn FieldComposer> {
        let composer = self
            .get(category)
            .ok_or(crate::Error::UnsupportedCategory(category))?;

        if record.category() != category {
            return Err(crate::Error::CategoryMismatch {
                title: record.derived_title(),
                expected: category,
                actual: record.category(),
            });
        }

        Ok(composer)
    }

    /// The whole create form for `record`: photos, category fields, price
    /// and description
    pub fn form_plan(&self, record: &ListingRecord, category: Category) -> crate::Result<StepPlan> {
        let composer = self.for_record(record, category)?;
        let title = record.derived_title();

        let photos = record.photo_paths().at(Stage::FillForm, &title)?;
        let mut plan = StepPlan::new().then(FormStep::photos(photos));
        plan.extend(composer.compose(record).at(Stage::FillForm, &title)?);
        plan.push(FormStep::text("Price", &record.price));
        plan.push(FormStep::multiline("Description", &record.description));

        Ok(plan)
    }

    /// Every record has a composer for `category` and a distinct title
    pub fn check_batch(&self, records: &[ListingRecord], category: Category) -> crate::Result<()> {
        let mut titles = HashSet::new();
        for record in records {
            self.for_record(record, category)?;
            let title = record.derived_title();
            if !titles.insert(title.clone()) {
                return Err(crate::Error::DuplicateTitle(title));
            }
        }
        Ok(())
    }
}

impl Default for Composers {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{InputKind, OptionMatch};
    use crate::testing::{item_record, vehicle_record};
    use relister_core::listing::SPORTS_AND_OUTDOORS;

    fn item(category: &str, brand: Option<&str>) -> ListingRecord {
        let mut record = item_record("Kayak");
        if let ListingDetails::Item(fields) = &mut record.details {
            fields.category = category.to_string();
            fields.brand = brand.map(str::to_string);
        }
        record
    }

    #[test]
    fn test_standard_covers_every_category() {
        let composers = Composers::standard();
        for category in Category::ALL {
            let composer = composers.get(category).unwrap();
            assert_eq!(composer.category(), category);
        }
    }

    #[test]
    fn test_item_fields_in_form_order() {
        let plan = ItemComposer.compose(&item_record("Kayak")).unwrap();
        assert_eq!(plan.fields(), vec!["Title", "Category", "Condition"]);

        let category = plan.step("Category").unwrap();
        assert!(category.scroll_first);
        assert_eq!(category.kind, InputKind::Select(OptionMatch::Exact));

        let condition = plan.step("Condition").unwrap();
        assert_eq!(condition.kind, InputKind::Select(OptionMatch::AutoDir));
    }

    #[test]
    fn test_brand_only_for_sports_and_outdoors() {
        let plan = ItemComposer
            .compose(&item(SPORTS_AND_OUTDOORS, Some("Perception")))
            .unwrap();
        assert_eq!(plan.step("Brand").unwrap().value, "Perception");

        for category in ["Sports", "sports & outdoors", "Miscellaneous", "Sports & Outdoors "] {
            let plan = ItemComposer
                .compose(&item(category, Some("Perception")))
                .unwrap();
            assert!(plan.step("Brand").is_none(), "brand written for {}", category);
        }
    }

    #[test]
    fn test_sports_item_without_brand_fails() {
        let err = ItemComposer
            .compose(&item(SPORTS_AND_OUTDOORS, None))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRecord(_)));
    }

    #[test]
    fn test_vehicle_fields_in_form_order() {
        let plan = VehicleComposer
            .compose(&vehicle_record("2019", "Toyota", "Camry"))
            .unwrap();
        assert_eq!(
            plan.fields(),
            vec!["Vehicle type", "Year", "Make", "Model", "Mileage", "Fuel type"]
        );
        assert!(plan.step("Year").unwrap().scroll_first);
        assert!(plan.step("Mileage").unwrap().scroll_first);
        assert_eq!(plan.step("Make").unwrap().kind, InputKind::Text);
    }

    #[test]
    fn test_composer_rejects_other_category() {
        let result = VehicleComposer.compose(&item_record("Kayak"));
        assert!(result.is_err());
    }

    #[test]
    fn test_form_plan_wraps_category_fields() {
        let plan = Composers::standard()
            .form_plan(&item_record("Kayak"), Category::Item)
            .unwrap();

        assert_eq!(
            plan.fields(),
            vec!["Photos", "Title", "Category", "Condition", "Price", "Description"]
        );
        assert_eq!(plan.step("Photos").unwrap().value.lines().count(), 2);
        assert_eq!(plan.step("Price").unwrap().value, "35");
        assert_eq!(
            plan.step("Description").unwrap().kind,
            InputKind::MultilineText
        );
    }

    #[test]
    fn test_form_plan_rejects_mismatched_record() {
        let err = Composers::standard()
            .form_plan(&vehicle_record("2019", "Toyota", "Camry"), Category::Item)
            .unwrap_err();
        assert!(matches!(err, crate::Error::CategoryMismatch { .. }));

        let err = Composers::empty()
            .form_plan(&item_record("Kayak"), Category::Item)
            .unwrap_err();
        assert!(matches!(err, crate::Error::UnsupportedCategory(Category::Item)));
    }

    #[test]
    fn test_registry_lookup() {
        let composers = Composers::standard();
        assert_eq!(
            composers.get(Category::Vehicle).unwrap().category(),
            Category::Vehicle
        );
        assert!(Composers::empty().get(Category::Item).is_none());
    }

    #[test]
    fn test_check_batch_rejects_repeated_titles() {
        let composers = Composers::standard();
        let records = vec![item_record("Kayak"), item_record("Canoe")];
        assert!(composers.check_batch(&records, Category::Item).is_ok());

        let repeated = vec![item_record("Kayak"), item_record("Kayak")];
        let err = composers.check_batch(&repeated, Category::Item).unwrap_err();
        assert!(matches!(err, crate::Error::DuplicateTitle(ref t) if t == "Kayak"));
    }
}
