use std::sync::Arc;

use teloxide::prelude::*;

use mailcheck_core::{domain::Interaction, frontend::Action};

use crate::handlers::log_failure;
use crate::router::AppState;

fn parse_command(text: &str) -> (String, String) {
    // Telegram may send `/cmd@botname arg1 ...`
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    (cmd, rest)
}

pub async fn handle_command(
    ix: &Interaction,
    text: &str,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    let (cmd, _args) = parse_command(text);
    tracing::debug!(user = ix.user_id.0, command = %cmd, "command");

    let result = match Action::from_command(&cmd) {
        Some(action) => state.frontend.dispatch(ix, action).await,
        None => state.frontend.on_unknown_command(ix).await,
    };
    log_failure(&format!("/{cmd}"), ix, result);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_addressed_commands() {
        assert_eq!(parse_command("/start"), ("start".to_string(), String::new()));
        assert_eq!(
            parse_command("/Check@MailCheckBot  a@x.io"),
            ("check".to_string(), "a@x.io".to_string())
        );
        assert_eq!(parse_command("  /status  "), ("status".to_string(), String::new()));
    }

    #[test]
    fn every_menu_command_maps_to_an_action() {
        for text in ["/start", "/check", "/help", "/cancel", "/status@bot"] {
            let (cmd, _) = parse_command(text);
            assert!(Action::from_command(&cmd).is_some(), "{text}");
        }
        let (cmd, _) = parse_command("/resume");
        assert!(Action::from_command(&cmd).is_none());
    }
}
