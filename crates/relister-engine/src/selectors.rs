//! Where things live in the marketplace UI.

use relister_core::surface::css_attr_value;
use relister_core::{Category, Locator};

pub const LOGGED_IN: &str = r#"svg[aria-label="Your profile"]"#;
pub const MARKETPLACE_LINK: &str = "//a[contains(@href, '/marketplace/?ref=bookmark')]";
pub const SELLING_LINK: &str = "//a[@href='/marketplace/you/selling/']";

pub const SEARCH_YOUR_LISTINGS: &str = r#"input[placeholder="Search your listings"]"#;

pub const DELETE_BUTTON: &str = r#"div:not([role="gridcell"]) > div[aria-label="Delete"][tabindex="0"]"#;
pub const CONFIRM_DELETE: &str = r#"div[aria-label="Delete listing"] div[aria-label="Delete"][tabindex="0"]"#;
pub const CONFIRM_DELETE_BUTTON_TEXT: &str = r#"//div[@aria-label="Delete listing"]//span[text()="Delete"]"#;
pub const LISTING_OVERLAY: &str = r#"div[aria-label="Your Listing"]"#;

pub const CREATE_LISTING: &str =
    r#"div[aria-label="Marketplace sidebar"] a[aria-label="Create new listing"]"#;
pub const PHOTO_INPUT: &str = r#"input[accept="image/*,image/heif,image/heic"]"#;
pub const NEXT_BUTTON: &str = r#"div [aria-label="Next"] > div"#;
pub const LOCATION_INPUT: &str = r#"label[aria-label="Location"] input"#;
pub const FIRST_LOCATION_SUGGESTION: &str = r#"ul[role="listbox"] li:first-child > div"#;
pub const PUBLISH_BUTTON: &str = r#"div[aria-label="Publish"]:not([aria-disabled])"#;
pub const PUBLISH_CONTROL: &str = r#"div[aria-label="Publish"]"#;

pub const SHARE_TO_GROUP: &str = "Share to a group";
pub const GROUP_SEARCH: &str = r#"[aria-label="Search for groups"]"#;
pub const CAPTION_PUBLIC_POST: &str = r#"[aria-label="Create a public post…"]"#;
pub const CAPTION_WRITE_SOMETHING: &str = r#"[aria-label="Write something..."]"#;
pub const POST_BUTTON: &str = r#"[aria-label="Post"]:not([aria-disabled])"#;
pub const DIALOG: &str = r#"[role="dialog"]"#;
pub const LOADING: &str = r#"[aria-label="Loading..."]"#;
pub const SHARED_CONFIRMATION: &str = "Shared to your group.";

/// Link that opens the create form for `category`
pub fn create_form(category: Category) -> Locator {
    Locator::css(format!(r#"a[href="/marketplace/create/{}/"]"#, category.as_str()))
}

/// Share button next to a listing in "Your listings"
pub fn share_button(title: &str) -> Locator {
    Locator::css(format!(
        r#"[aria-label="{}"] + div [aria-label="Share"]"#,
        css_attr_value(title)
    ))
}

/// The labelled control for a form field
pub fn field_label(field: &str) -> Locator {
    Locator::css(format!(r#"label[aria-label="{}"]"#, css_attr_value(field)))
}

/// Single-line input inside a labelled form field
pub fn field_input(field: &str) -> Locator {
    Locator::css(format!(r#"label[aria-label="{}"] input"#, css_attr_value(field)))
}

/// Multi-line input inside a labelled form field
pub fn field_textarea(field: &str) -> Locator {
    Locator::css(format!(r#"label[aria-label="{}"] textarea"#, css_attr_value(field)))
}

/// Caption inputs, one per known share-dialog layout, in the order they are tried
pub fn caption_candidates() -> Vec<Locator> {
    vec![
        Locator::css(CAPTION_PUBLIC_POST),
        Locator::css(CAPTION_WRITE_SOMETHING),
    ]
}
