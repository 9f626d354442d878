//! Prompt rendering and reply parsing for LLM agents.

use crate::agents::{AgentError, Decision};
use oanquan::{CellIndex, Snapshot};
use serde::Deserialize;
use tracing::{debug, instrument};

/// System prompt shared by every LLM agent.
pub const SYSTEM_PROMPT: &str =
    "You are an intelligent agent playing the traditional Vietnamese game \"Ô Ăn Quan\".";

/// Renders the user message for one turn.
///
/// `rejection` carries the reason the previous reply was refused, if any.
pub fn render(snapshot: &Snapshot, persona: &str, rejection: Option<&str>) -> String {
    let side = snapshot.current_player;
    let mut message = format!(
        "You are Player Team {side} in the game \"Ô Ăn Quan\".\n\n\
         **Persona**\n{persona}\n\n\
         **Game Rules**\n\
         - The ring is QA, A1..A5, QB, B1..B5; stones travel {direction} around it\n\
         - Do not start from mandarin cells (QA, QB)\n\
         - Only pick from your own side ({side}1..{side}5)\n\
         - You must pick a position that has at least one stone\n\
         - If the cell after your last stone is empty, you capture the cell beyond it\n\
         - The game ends when both mandarins are captured or a player cannot restore their cells\n\n\
         **Current Game State** (move {move_number})\n{board}\n\n\
         Scores: {scores}\n\
         Available positions: {legal}\n\n",
        direction = snapshot.rules.direction(),
        move_number = snapshot.move_number + 1,
        board = snapshot.board.display(),
        scores = snapshot.scores,
        legal = snapshot.legal_labels(),
    );

    if let Some(reason) = rejection {
        message.push_str(&format!(
            "Your previous answer was rejected: {reason}\nChoose one of the available positions.\n\n"
        ));
    }

    message.push_str(
        "Reply with JSON only:\n\
         {\"observation\": \"<what you see>\", \"reason\": \"<why>\", \"action\": {\"pos\": \"<position>\"}}\n\
         Use \"resign\" as the position to give up.",
    );
    message
}

#[derive(Debug, Deserialize)]
struct Reply {
    #[serde(default)]
    observation: String,
    #[serde(default)]
    reason: String,
    action: ReplyAction,
}

#[derive(Debug, Deserialize)]
struct ReplyAction {
    pos: serde_json::Value,
}

/// Extracts a decision from a model reply.
///
/// Accepts the JSON object requested in the prompt (optionally wrapped in a
/// code fence or surrounded by prose), or a bare label / index such as `A3`
/// or `3`. The word `resign` resigns.
///
/// # Errors
///
/// Returns a malformed-reply [`AgentError`] when no move can be read.
#[instrument(skip(text))]
pub fn parse_decision(text: &str) -> Result<Decision, AgentError> {
    if let Some(json) = json_object(text) {
        if let Ok(reply) = serde_json::from_str::<Reply>(json) {
            debug!(observation = %reply.observation, reason = %reply.reason, "Parsed structured reply");
            let pos = match &reply.action.pos {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            return parse_action(&pos);
        }
    }
    parse_action(text)
}

/// The outermost `{...}` span of `text`, if any.
fn json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn parse_action(raw: &str) -> Result<Decision, AgentError> {
    let token = raw
        .trim()
        .trim_matches(|c: char| c == '`' || c == '"' || c == '\'' || c == '.' || c.is_whitespace());
    if token.eq_ignore_ascii_case("resign") {
        return Ok(Decision::Resign);
    }
    token
        .parse::<CellIndex>()
        .map(Decision::Sow)
        .map_err(|e| AgentError::malformed(format!("cannot read a move from {:?}: {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::AgentErrorKind;
    use oanquan::GameState;

    fn sow(label: &str) -> Decision {
        Decision::Sow(label.parse().expect("label"))
    }

    #[test]
    fn test_render_lists_legal_positions() {
        let prompt = render(&GameState::default().snapshot(), "a bold attacker", None);
        assert!(prompt.contains("Player Team A"));
        assert!(prompt.contains("a bold attacker"));
        assert!(prompt.contains("A1, A2, A3, A4, A5"));
        assert!(!prompt.contains("rejected"));
    }

    #[test]
    fn test_render_mentions_rejection() {
        let prompt = render(&GameState::default().snapshot(), "p", Some("B1 is not yours"));
        assert!(prompt.contains("rejected: B1 is not yours"));
    }

    #[test]
    fn test_parses_structured_reply() {
        let reply = r#"{"observation": "A3 is full", "reason": "set up a capture", "action": {"pos": "A3", "way": "clockwise"}}"#;
        assert_eq!(parse_decision(reply).expect("parses"), sow("A3"));
    }

    #[test]
    fn test_parses_fenced_reply() {
        let reply = "Here is my move:\n```json\n{\"action\": {\"pos\": \"a5\"}}\n```";
        assert_eq!(parse_decision(reply).expect("parses"), sow("A5"));
    }

    #[test]
    fn test_parses_numeric_position() {
        assert_eq!(parse_decision(r#"{"action": {"pos": 2}}"#).expect("parses"), sow("A2"));
        assert_eq!(parse_decision(" 4 ").expect("parses"), sow("A4"));
    }

    #[test]
    fn test_parses_bare_label_and_resign() {
        assert_eq!(parse_decision("B2.").expect("parses"), sow("B2"));
        assert_eq!(parse_decision("Resign").expect("parses"), Decision::Resign);
        assert_eq!(
            parse_decision(r#"{"action": {"pos": "resign"}}"#).expect("parses"),
            Decision::Resign
        );
    }

    #[test]
    fn test_rejects_gibberish() {
        let err = parse_decision("I think the left side looks nice").expect_err("no move");
        assert_eq!(err.kind, AgentErrorKind::Malformed);
    }
}
