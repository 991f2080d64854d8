use anyhow::Result;
use tracing::info;

use crate::{api::ContextSource, context::AppContext, page::PageHost};

/// Loads config and the current user together and commits both. On failure
/// the context is left as it was.
pub async fn bootstrap<P: PageHost>(
    ctx: &mut AppContext<P>,
    source: &dyn ContextSource,
) -> Result<()> {
    let (config, user) = futures::try_join!(source.load_config(), source.load_current_user())?;

    let session = ctx.session_mut();
    session.set_config(config);
    session.set_current_user(user);
    info!(
        authenticated = session.is_authenticated(),
        terms = session.config().available_terms.len(),
        "context bootstrapped"
    );
    Ok(())
}
