//! A small colour markup language for terminal output.
//!
//! Markup codes start with `@`: `@{cf}` switches to a cyan foreground, `@!`
//! turns bold on, `@|` resets everything and `@@` is a literal `@`.  See
//! [`CODES`] for the full set of named codes.

use std::{borrow::Cow, collections::HashMap};

use colored::Color;
use once_cell::sync::Lazy;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    /// An SGR parameter, emitted as `ESC [ <param> m` when colour is on.
    Sgr(Cow<'static, str>),
    /// Text that's emitted as-is regardless of colour.
    Literal(&'static str),
}

const RESET: &str = "0";

const fn sgr(param: &'static str) -> Token {
    Token::Sgr(Cow::Borrowed(param))
}

pub const FOREGROUNDS: [&str; 8] = ["kf", "rf", "gf", "yf", "bf", "pf", "cf", "wf"];
pub const BACKGROUNDS: [&str; 8] = ["kb", "rb", "gb", "yb", "bb", "pb", "cb", "wb"];

static CODES: Lazy<HashMap<&'static str, Token>> = Lazy::new(|| {
    let mut codes = HashMap::new();

    for ((fg, bg), color) in FOREGROUNDS.iter().zip(BACKGROUNDS.iter()).zip(COLORS) {
        codes.insert(*fg, Token::Sgr(color.to_fg_str().into()));
        codes.insert(*bg, Token::Sgr(color.to_bg_str().into()));
    }

    codes.extend([
        ("boldon", sgr("1")),
        ("boldoff", sgr("22")),
        ("italicson", sgr("3")),
        ("italicsoff", sgr("23")),
        ("ulon", sgr("4")),
        ("uloff", sgr("24")),
        ("invon", sgr("7")),
        ("invoff", sgr("27")),
        ("reset", sgr(RESET)),
        ("atexclamation", Token::Literal("@!")),
        ("atfwdslash", Token::Literal("@/")),
        ("atunderscore", Token::Literal("@_")),
        ("atbar", Token::Literal("@|")),
    ]);

    codes
});

/// The colours behind [`FOREGROUNDS`] and [`BACKGROUNDS`], in the same order.
const COLORS: [Color; 8] = [
    Color::Black,
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::White,
];

/// Renders markup for the terminal, honouring the current colour setting.
pub fn fmt(markup: &str) -> String {
    render(markup, colors_enabled())
}

/// Escapes any markup in `text` so it renders verbatim.
pub fn sanitize(text: &str) -> String {
    text.replace('@', "@@")
}

pub fn colors_enabled() -> bool {
    colored::control::SHOULD_COLORIZE.should_colorize()
}

pub fn set_colors_enabled(enabled: bool) {
    colored::control::set_override(enabled)
}

/// Renders markup with or without colour, regardless of the current setting.
pub fn render(markup: &str, color: bool) -> String {
    let mut output = String::with_capacity(markup.len());
    let mut needs_reset = false;
    let mut rest = markup;

    while let Some(index) = rest.find('@') {
        output.push_str(&rest[..index]);
        rest = &rest[index..];

        let Some((token, len)) = next_token(rest) else {
            // Not a code we know about, so leave it alone.
            output.push('@');
            rest = &rest[1..];
            continue;
        };
        rest = &rest[len..];

        match token {
            Token::Literal(text) => output.push_str(text),
            Token::Sgr(param) if color => {
                output.push_str("\x1b[");
                output.push_str(&param);
                output.push('m');
                needs_reset = param != RESET;
            }
            Token::Sgr(_) => {}
        }
    }
    output.push_str(rest);

    if needs_reset {
        output.push_str("\x1b[0m");
    }

    output
}

/// Parses the code at the start of `text`, which must start with an `@`.
///
/// Returns the token and the number of bytes it occupied.
fn next_token(text: &str) -> Option<(Token, usize)> {
    let mut chars = text.chars().skip(1);
    let token = match chars.next()? {
        '@' => Token::Literal("@"),
        '!' => sgr("1"),
        '/' => sgr("3"),
        '_' => sgr("4"),
        '|' => sgr(RESET),
        '{' => {
            let end = text.find('}')?;
            let name = &text[2..end];
            return CODES.get(name).map(|token| (token.clone(), end + 1));
        }
        _ => return None,
    };
    Some((token, 2))
}

/// Strips any ANSI CSI escape sequences from `text`.
pub fn remove_ansi_escape(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\x1b' || chars.peek() != Some(&'[') {
            output.push(c);
            continue;
        }
        chars.next();
        // Parameter & intermediate bytes run until a final byte in @..~
        for c in chars.by_ref() {
            if ('@'..='~').contains(&c) {
                break;
            }
        }
    }

    output
}

/// A test pattern showing every foreground on every background.
pub fn test_colors() -> String {
    let mut lines = vec![
        fmt("@{wf}Text attributes:@|"),
        fmt("  @!bold@|  @/italics@|  @_underline@|  @{invon}inverse@|"),
        String::new(),
        fmt("@{wf}Foreground / background:@|"),
    ];

    for fg in FOREGROUNDS {
        let mut line = String::from("  ");
        for bg in BACKGROUNDS {
            line.push_str(&format!("@{{{fg}}}@{{{bg}}} {fg}/{bg} @|"));
        }
        lines.push(fmt(&line));
    }

    lines.join("\n")
}
