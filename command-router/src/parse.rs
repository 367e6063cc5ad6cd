//! Command text parsing: `"/Start@my_bot hello world"` → command `start`, mention `my_bot`,
//! args `"hello world"`.

/// Parsed command invocation, derived per dispatch and not kept afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<'a> {
    /// Normalized command name (lowercase, no leading `/`, no `@mention`).
    pub command: String,
    /// Bot username after `@` in the command token, lowercased.
    pub mention: Option<String>,
    /// Text after the first space, verbatim; `""` when absent.
    pub args: &'a str,
}

/// Lowercases and strips one leading `/`.
pub fn normalize_command(name: &str) -> String {
    name.strip_prefix('/').unwrap_or(name).to_lowercase()
}

/// Parses message text into an [`Invocation`]. Returns `None` when the trimmed text does not
/// start with `/`.
pub fn parse_command(text: &str) -> Option<Invocation<'_>> {
    let text = text.trim();
    if !text.starts_with('/') {
        return None;
    }
    let (token, args) = text.split_once(' ').unwrap_or((text, ""));
    let (token, mention) = match token.split_once('@') {
        Some((name, bot)) => (name, Some(bot.to_lowercase())),
        None => (token, None),
    };
    Some(Invocation {
        command: normalize_command(token),
        mention,
        args,
    })
}
