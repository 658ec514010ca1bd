use crate::selectors;
use relister_core::{AutomationSurface, Locator, Result, Timeouts};

/// Sign-in bootstrap: open the site, wait until the session is signed in,
/// then go to Marketplace → Selling
///
/// The login wait is long so an operator can sign in by hand the first time
/// a profile is used; later runs reuse the profile's session.
pub async fn open_selling_page<S>(surface: &S, marketplace_url: &str, timeouts: &Timeouts) -> Result<()>
where
    S: AutomationSurface + ?Sized,
{
    tracing::info!("Opening {}", marketplace_url);
    surface.navigate(marketplace_url).await?;

    tracing::info!("Waiting up to {:?} for a signed-in session", timeouts.login);
    surface
        .wait_until_present(&Locator::css(selectors::LOGGED_IN), timeouts.login)
        .await?;

    surface
        .click(&Locator::xpath(selectors::MARKETPLACE_LINK))
        .await?;
    surface.click(&Locator::xpath(selectors::SELLING_LINK)).await?;

    tracing::info!("On the Marketplace selling page");
    Ok(())
}
