//! Gesture scripts: a plain-text recording of what a host would deliver.
//!
//! ```text
//! # select, then refine
//! down 10 10
//! move 50 50
//! up 50 50
//! brush pr_bg 3
//! down 20 20
//! up 20 20
//! ```

use std::str::FromStr;

use crate::input::PointerEvent;
use crate::session::BrushMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptCommand {
    Pointer(PointerEvent),
    Brush { mode: BrushMode, radius: Option<u32> },
    Reset,
}

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
}

impl FromStr for ScriptCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let verb = words.next().ok_or("empty command")?;
        let args: Vec<&str> = words.collect();

        let command = match verb {
            "down" | "move" | "up" => {
                let &[x, y] = args.as_slice() else {
                    return Err(format!("`{verb}` takes X Y"));
                };
                let x = x.parse::<i32>().map_err(|e| format!("bad x {x:?}: {e}"))?;
                let y = y.parse::<i32>().map_err(|e| format!("bad y {y:?}: {e}"))?;
                ScriptCommand::Pointer(match verb {
                    "down" => PointerEvent::down(x, y),
                    "move" => PointerEvent::moved(x, y),
                    _ => PointerEvent::up(x, y),
                })
            }
            "brush" => {
                let (mode, radius) = match args.as_slice() {
                    &[mode] => (mode, None),
                    &[mode, radius] => (mode, Some(radius)),
                    _ => return Err("`brush` takes MODE [RADIUS]".into()),
                };
                let mode = mode.parse::<BrushMode>().map_err(|e| e.to_string())?;
                let radius = radius
                    .map(|r| r.parse::<u32>().map_err(|e| format!("bad radius {r:?}: {e}")))
                    .transpose()?;
                ScriptCommand::Brush { mode, radius }
            }
            "reset" if args.is_empty() => ScriptCommand::Reset,
            other => return Err(format!("unknown command {other:?}")),
        };

        Ok(command)
    }
}

/// Parse a whole script. Blank lines and `#` comments are skipped.
pub fn parse_script(text: &str) -> Result<Vec<ScriptCommand>, ScriptError> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.split('#').next().unwrap_or("").trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line, body)| {
            body.parse()
                .map_err(|message| ScriptError::Syntax { line, message })
        })
        .collect()
}
