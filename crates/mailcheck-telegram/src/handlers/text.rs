use std::sync::Arc;

use teloxide::prelude::*;

use mailcheck_core::domain::Interaction;

use crate::handlers::log_failure;
use crate::router::AppState;

pub async fn handle_text(ix: &Interaction, text: &str, state: Arc<AppState>) -> ResponseResult<()> {
    let result = state.frontend.on_text(ix, text).await;
    log_failure("text", ix, result);
    Ok(())
}
