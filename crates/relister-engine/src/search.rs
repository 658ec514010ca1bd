use crate::selectors;
use relister_core::{AutomationSurface, Locator, Result, Timeouts};

/// Search "Your listings" for `title` and return the matching result
///
/// `None` when the search box is missing or nothing matches exactly.
pub async fn find_listing_by_title<S>(
    surface: &S,
    title: &str,
    timeouts: &Timeouts,
) -> Result<Option<Locator>>
where
    S: AutomationSurface + ?Sized,
{
    let search = Locator::css(selectors::SEARCH_YOUR_LISTINGS);
    if !surface.find_element(&search, false, timeouts.element).await? {
        tracing::debug!("No listing search box on the page");
        return Ok(None);
    }

    surface.clear_text(&search).await?;
    surface.send_keys(&search, title).await?;

    let result = Locator::span_text(title);
    if surface
        .find_element(&result, false, timeouts.search_result)
        .await?
    {
        Ok(Some(result))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeSurface};

    #[tokio::test]
    async fn test_finds_live_listing() {
        let surface = FakeSurface::new().with_live("Mini Excavator");
        let found = find_listing_by_title(&surface, "Mini Excavator", &Timeouts::immediate())
            .await
            .unwrap();

        assert_eq!(found, Some(Locator::span_text("Mini Excavator")));
        let search = Locator::css(selectors::SEARCH_YOUR_LISTINGS);
        assert!(surface.calls().contains(&Call::Clear(search.clone())));
        assert!(
            surface
                .calls()
                .contains(&Call::SendKeys(search, "Mini Excavator".to_string()))
        );
    }

    #[tokio::test]
    async fn test_missing_listing_is_none() {
        let surface = FakeSurface::new().with_live("Something Else");
        let found = find_listing_by_title(&surface, "Mini Excavator", &Timeouts::immediate())
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_missing_search_box_is_none() {
        let surface = FakeSurface::new()
            .with_live("Mini Excavator")
            .without(Locator::css(selectors::SEARCH_YOUR_LISTINGS));
        let found = find_listing_by_title(&surface, "Mini Excavator", &Timeouts::immediate())
            .await
            .unwrap();

        assert!(found.is_none());
        assert!(surface.writes().is_empty());
    }
}
