//! Key binding snippets for `shist --bind`.

use thiserror::Error;

#[derive(Debug, Error)]
#[error("Unsupported shell: {0}")]
pub struct UnsupportedShell(pub String);

/// Bind Ctrl-R to a widget that captures our stdout.
///
/// `bind -x` widgets cannot run the line themselves, so Ctrl-R is a macro:
/// `\C-x\C-r` runs the widget, which points `\C-x\C-x` at `accept-line`
/// when shist exits with the execute status and at nothing otherwise, and
/// the macro presses `\C-x\C-x` next.
const BASH_PRINT: &str = r#"__shist_widget() {
  local selected status
  selected=$(READLINE_LINE="$READLINE_LINE" READLINE_POINT="$READLINE_POINT" shist)
  status=$?
  if [ $status -eq 0 ] || [ $status -eq 10 ]; then
    READLINE_LINE=$selected
    READLINE_POINT=${#READLINE_LINE}
  fi
  if [ $status -eq 10 ]; then
    bind '"\C-x\C-x": accept-line'
  else
    bind '"\C-x\C-x": ""'
  fi
}
bind -x '"\C-x\C-r": __shist_widget'
bind '"\C-r": "\C-x\C-r\C-x\C-x"'"#;

/// Bind Ctrl-R to run shist, which types the selection back itself.
const BASH_IOCSTI: &str =
    r#"bind -x '"\C-r": READLINE_LINE="$READLINE_LINE" READLINE_POINT="$READLINE_POINT" shist --iocsti'"#;

/// The binding command to `eval` in `shell`'s startup file.
pub fn bind_command(shell: &str, iocsti: bool) -> Result<&'static str, UnsupportedShell> {
    match shell {
        "bash" if iocsti => Ok(BASH_IOCSTI),
        "bash" => Ok(BASH_PRINT),
        other => Err(UnsupportedShell(other.to_string())),
    }
}
