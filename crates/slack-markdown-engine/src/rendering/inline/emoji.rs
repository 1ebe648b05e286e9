//! Shortcode to Unicode emoji table.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Known shortcodes, without their surrounding colons.
const SHORTCODES: &[(&str, &str)] = &[
    ("smile", "😄"),
    ("smiley", "😃"),
    ("grin", "😁"),
    ("laughing", "😆"),
    ("satisfied", "😆"),
    ("sweat_smile", "😅"),
    ("joy", "😂"),
    ("heart", "❤️"),
    ("heart_eyes", "😍"),
    ("thumbsup", "👍"),
    ("+1", "👍"),
    ("thumbsdown", "👎"),
    ("-1", "👎"),
    ("clap", "👏"),
    ("pray", "🙏"),
    ("raised_hands", "🙌"),
    ("muscle", "💪"),
    ("metal", "🤘"),
    ("ok_hand", "👌"),
    ("point_up", "☝️"),
    ("point_down", "👇"),
    ("point_left", "👈"),
    ("point_right", "👉"),
    ("wave", "👋"),
    ("eyes", "👀"),
    ("tongue", "👅"),
    ("ear", "👂"),
    ("nose", "👃"),
    ("fire", "🔥"),
    ("star", "⭐"),
    ("sparkles", "✨"),
    ("100", "💯"),
    ("heavy_check_mark", "✔️"),
    ("white_check_mark", "✅"),
    ("x", "❌"),
    ("warning", "⚠️"),
    ("no_entry", "⛔"),
    ("tada", "🎉"),
    ("confetti_ball", "🎊"),
    ("gift", "🎁"),
    ("rocket", "🚀"),
    ("airplane", "✈️"),
    ("hourglass", "⌛"),
    ("watch", "⌚"),
    ("alarm_clock", "⏰"),
    ("hourglass_flowing_sand", "⏳"),
    ("bulb", "💡"),
    ("flashlight", "🔦"),
    ("book", "📖"),
    ("books", "📚"),
    ("memo", "📝"),
    ("pencil2", "✏️"),
    ("mag", "🔍"),
    ("mag_right", "🔎"),
    ("lock", "🔒"),
    ("unlock", "🔓"),
    ("key", "🔑"),
    ("email", "✉️"),
    ("phone", "☎️"),
    ("computer", "💻"),
    ("desktop_computer", "🖥️"),
    ("keyboard", "⌨️"),
    ("house", "🏠"),
    ("office", "🏢"),
    ("hospital", "🏥"),
    ("bank", "🏦"),
    ("atm", "🏧"),
    ("hotel", "🏨"),
    ("school", "🏫"),
    ("convenience_store", "🏪"),
    ("sun", "☀️"),
    ("cloud", "☁️"),
    ("partly_sunny", "⛅"),
    ("rain_cloud", "🌧️"),
    ("snowflake", "❄️"),
    ("zap", "⚡"),
    ("umbrella", "☂️"),
    ("coffee", "☕"),
    ("tea", "🍵"),
    ("beer", "🍺"),
    ("wine_glass", "🍷"),
    ("cocktail", "🍸"),
    ("pizza", "🍕"),
    ("hamburger", "🍔"),
    ("fries", "🍟"),
    ("ramen", "🍜"),
    ("sushi", "🍣"),
    ("bento", "🍱"),
    ("apple", "🍎"),
    ("green_apple", "🍏"),
    ("banana", "🍌"),
    ("watermelon", "🍉"),
    ("strawberry", "🍓"),
    ("cherry_blossom", "🌸"),
    ("rose", "🌹"),
    ("sunflower", "🌻"),
    ("leaves", "🍃"),
    ("seedling", "🌱"),
    ("tree", "🌳"),
    ("cat", "🐱"),
    ("dog", "🐶"),
    ("mouse", "🐭"),
    ("hamster", "🐹"),
    ("rabbit", "🐰"),
    ("bear", "🐻"),
    ("panda_face", "🐼"),
    ("koala", "🐨"),
    ("tiger", "🐯"),
    ("lion", "🦁"),
    ("cow", "🐮"),
    ("pig", "🐷"),
    ("frog", "🐸"),
    ("octopus", "🐙"),
    ("monkey_face", "🐵"),
    ("see_no_evil", "🙈"),
    ("hear_no_evil", "🙉"),
    ("speak_no_evil", "🙊"),
];

fn table() -> &'static HashMap<&'static str, &'static str> {
    static TABLE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| SHORTCODES.iter().copied().collect())
}

/// Unicode emoji for a bare shortcode name such as `thumbsup`.
pub fn lookup(name: &str) -> Option<&'static str> {
    table().get(name).copied()
}

/// Converts a `:name:` shortcode to its emoji, or returns it unchanged.
pub fn format_emoji(shortcode: &str) -> String {
    shortcode
        .strip_prefix(':')
        .and_then(|s| s.strip_suffix(':'))
        .and_then(lookup)
        .map(str::to_string)
        .unwrap_or_else(|| shortcode.to_string())
}

/// Emoji for a rich-text emoji element: the table first, then the element's
/// hyphen-separated hex code points, then the `:name:` shortcode itself.
pub fn resolve(name: &str, unicode: Option<&str>) -> String {
    if let Some(emoji) = lookup(name) {
        return emoji.to_string();
    }
    unicode
        .and_then(from_code_points)
        .unwrap_or_else(|| format!(":{name}:"))
}

fn from_code_points(hex: &str) -> Option<String> {
    hex.split('-')
        .map(|part| u32::from_str_radix(part.trim(), 16).ok().and_then(char::from_u32))
        .collect()
}
