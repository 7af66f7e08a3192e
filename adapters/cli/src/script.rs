//! Parsing for `turn:place:action` deployment steps.

use anyhow::{Context, Result};
use colony_defence_core::DefenderKind;
use colony_defence_system_deployment::ScriptedStrategy;

/// Folds raw step strings into a scripted strategy.
///
/// Each step has the form `turn:place:action`, where `action` is either a
/// defender display name (for example `Thrower`) or the literal `remove`.
pub(crate) fn parse_steps(raw: &[String]) -> Result<ScriptedStrategy> {
    let mut strategy = ScriptedStrategy::new();
    for step in raw {
        strategy = parse_step(strategy, step)
            .with_context(|| format!("invalid step `{step}`"))?;
    }
    Ok(strategy)
}

fn parse_step(strategy: ScriptedStrategy, raw: &str) -> Result<ScriptedStrategy> {
    let mut parts = raw.splitn(3, ':');
    let turn = parts
        .next()
        .context("missing turn")?
        .parse::<u32>()
        .context("turn must be a non-negative integer")?;
    let place = parts.next().context("missing place name")?;
    let action = parts.next().context("missing action")?;

    if action.eq_ignore_ascii_case("remove") {
        return Ok(strategy.remove(turn, place));
    }
    let kind = DefenderKind::from_display_name(action)
        .with_context(|| format!("unknown defender `{action}`"))?;
    Ok(strategy.deploy(turn, place, kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_deploy_and_remove_steps() {
        let steps = vec![
            "0:tunnel_0_0:Thrower".to_owned(),
            "2:tunnel_0_0:remove".to_owned(),
        ];
        assert!(parse_steps(&steps).is_ok());
    }

    #[test]
    fn rejects_malformed_turns_and_unknown_defenders() {
        let bad_turn = vec!["soon:tunnel_0_0:Thrower".to_owned()];
        assert!(parse_steps(&bad_turn).is_err());

        let bad_kind = vec!["0:tunnel_0_0:Remover".to_owned()];
        let error = parse_steps(&bad_kind).unwrap_err();
        assert!(format!("{error:#}").contains("unknown defender"));
    }

    #[test]
    fn rejects_steps_with_missing_fields() {
        let truncated = vec!["0:tunnel_0_0".to_owned()];
        assert!(parse_steps(&truncated).is_err());
    }
}
