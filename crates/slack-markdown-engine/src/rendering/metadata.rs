//! Author header, timestamps, reactions, thread and edit annotations.

use chrono::{DateTime, Utc};

use crate::models::{EditRecord, Message, Reaction};

use super::{RenderContext, inline, tags};

/// `YYYY-MM-DD HH:MM:SS`, used for every rendered timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Whole seconds since the epoch as a UTC instant. Fractions are floored;
/// `None` when the value is not finite or outside chrono's range.
pub(crate) fn utc_from_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    DateTime::from_timestamp(seconds.floor() as i64, 0)
}

/// Renders a numeric seconds string (e.g. `"1704980400.123456"`) in UTC.
/// Anything that is not a representable number renders as `""`.
pub fn format_timestamp(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| raw.parse::<f64>().ok())
        .and_then(utc_from_seconds)
        .map(|time| time.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}

/// `**@name** - 2024-01-11 13:40:00`, either half optional.
pub fn render_header(user: Option<&str>, ts: Option<&str>, ctx: &RenderContext) -> String {
    let mut parts = Vec::with_capacity(2);
    if let Some(user) = user.filter(|u| !u.is_empty()) {
        parts.push(format!("**{}**", ctx.mention(user)));
    }
    let time = format_timestamp(ts);
    if !time.is_empty() {
        parts.push(time);
    }
    parts.join(" - ")
}

/// One line per reaction with a positive count.
///
/// Tagged: `<reaction count="2" users="U1 U2">thumbsup</reaction>`.
/// Markdown: `- 👍 2 (@Alice, @U2)`.
pub fn render_reactions(reactions: &[Reaction], ctx: &RenderContext) -> String {
    reactions
        .iter()
        .filter(|reaction| reaction.count > 0)
        .map(|reaction| {
            if ctx.is_tagged() {
                tagged_reaction(reaction)
            } else {
                markdown_reaction(reaction, ctx)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn tagged_reaction(reaction: &Reaction) -> String {
    let count = reaction.count.to_string();
    let users = reaction.users.join(" ");
    tags::element(
        "reaction",
        &[("count", count.as_str()), ("users", users.as_str())],
        &reaction.name,
    )
}

fn markdown_reaction(reaction: &Reaction, ctx: &RenderContext) -> String {
    let emoji = inline::format_emoji(&format!(":{}:", reaction.name));
    let line = format!("- {emoji} {}", reaction.count);
    if reaction.users.is_empty() {
        return line;
    }
    let users = reaction
        .users
        .iter()
        .map(|user| ctx.mention(user))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{line} ({users})")
}

/// `↳ **Reply to thread**` for replies, a reply summary for thread roots.
pub fn render_thread_info(message: &Message) -> String {
    if message.is_thread_reply() {
        return "↳ **Reply to thread**".to_string();
    }
    match message.reply_count {
        Some(replies) if replies > 0 => {
            let users = message
                .reply_users_count
                .unwrap_or(message.reply_users.len() as i64);
            format!(
                "💬 **Thread** ({replies} {}, {users} {})",
                plural(replies, "reply", "replies"),
                plural(users, "user", "users"),
            )
        }
        _ => String::new(),
    }
}

fn plural(count: i64, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

/// `*(edited by @name at 2024-01-11 14:40:00)*`, dropping whichever clause
/// has no data.
pub fn render_edit_info(edit: Option<&EditRecord>, ctx: &RenderContext) -> String {
    let Some(edit) = edit else {
        return String::new();
    };
    let mut text = String::from("edited");
    if !edit.user.is_empty() {
        text.push_str(" by ");
        text.push_str(&ctx.mention(&edit.user));
    }
    let time = format_timestamp(Some(&edit.ts));
    if !time.is_empty() {
        text.push_str(" at ");
        text.push_str(&time);
    }
    format!("*({text})*")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NameTable;
    use crate::rendering::OutputStyle;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn reaction(name: &str, users: &[&str], count: i64) -> Reaction {
        Reaction {
            name: name.to_string(),
            users: users.iter().map(|u| u.to_string()).collect(),
            count,
        }
    }

    #[rstest]
    #[case(Some("1704980400"), "2024-01-11 13:40:00")]
    #[case(Some("1577836800"), "2020-01-01 00:00:00")]
    #[case(Some("1704980400.123456"), "2024-01-11 13:40:00")]
    #[case(Some("-0.5"), "1969-12-31 23:59:59")]
    #[case(Some(""), "")]
    #[case(Some("soon"), "")]
    #[case(Some("NaN"), "")]
    #[case(Some("1e300"), "")]
    #[case(None, "")]
    fn test_timestamps(#[case] raw: Option<&str>, #[case] expected: &str) {
        assert_eq!(format_timestamp(raw), expected);
    }

    #[rstest]
    #[case(Some("U123456"), Some("1704980400"), "**@U123456** - 2024-01-11 13:40:00")]
    #[case(Some("U123456"), None, "**@U123456**")]
    #[case(None, Some("1704980400"), "2024-01-11 13:40:00")]
    #[case(None, None, "")]
    fn test_headers(#[case] user: Option<&str>, #[case] ts: Option<&str>, #[case] expected: &str) {
        assert_eq!(render_header(user, ts, &RenderContext::default()), expected);
    }

    #[test]
    fn test_header_uses_name_table() {
        let names = NameTable::from([("U1".to_string(), "Alice".to_string())]);
        let ctx = RenderContext::new(Some(&names), OutputStyle::Tagged);
        assert_eq!(render_header(Some("U1"), None, &ctx), "**@Alice**");
    }

    #[test]
    fn test_tagged_reactions() {
        let reactions = [
            reaction("thumbsup", &["U123456"], 1),
            reaction("heart", &["U234567", "U345678"], 2),
        ];
        assert_eq!(
            render_reactions(&reactions, &RenderContext::default()),
            "<reaction count=\"1\" users=\"U123456\">thumbsup</reaction>\n\
             <reaction count=\"2\" users=\"U234567 U345678\">heart</reaction>"
        );
    }

    #[test]
    fn test_zero_count_reactions_are_dropped() {
        let reactions = [reaction("x", &[], 0), reaction("heart", &["U123456"], 1)];
        assert_eq!(
            render_reactions(&reactions, &RenderContext::default()),
            "<reaction count=\"1\" users=\"U123456\">heart</reaction>"
        );
        assert_eq!(render_reactions(&[reaction("x", &[], 0)], &RenderContext::default()), "");
    }

    #[test]
    fn test_markdown_reactions() {
        let names = NameTable::from([("U1".to_string(), "Alice".to_string())]);
        let ctx = RenderContext::new(Some(&names), OutputStyle::Markdown);
        let reactions = [
            reaction("thumbsup", &["U1", "U2"], 2),
            reaction("custom-emoji", &[], 1),
        ];
        assert_eq!(
            render_reactions(&reactions, &ctx),
            "- 👍 2 (@Alice, @U2)\n- :custom-emoji: 1"
        );
    }

    fn thread_message(ts: &str, replies: Option<i64>, users: Option<i64>) -> Message {
        Message {
            ts: Some(ts.to_string()),
            reply_count: replies,
            reply_users_count: users,
            ..Message::default()
        }
    }

    #[rstest]
    #[case(thread_message("1704980400", Some(5), Some(2)), "💬 **Thread** (5 replies, 2 users)")]
    #[case(thread_message("1704980400", Some(1), Some(1)), "💬 **Thread** (1 reply, 1 user)")]
    #[case(thread_message("1704980400", Some(0), None), "")]
    #[case(thread_message("1704980400", None, None), "")]
    fn test_thread_roots(#[case] message: Message, #[case] expected: &str) {
        assert_eq!(render_thread_info(&message), expected);
    }

    #[test]
    fn test_thread_reply() {
        let message = Message {
            ts: Some("1704981000".into()),
            thread_ts: Some("1704980400".into()),
            parent_user_id: Some("U123456".into()),
            ..Message::default()
        };
        assert_eq!(render_thread_info(&message), "↳ **Reply to thread**");
    }

    #[test]
    fn test_reply_users_counted_when_count_missing() {
        let message = Message {
            reply_users: vec!["U1".into(), "U2".into(), "U3".into()],
            ..thread_message("1704980400", Some(4), None)
        };
        assert_eq!(render_thread_info(&message), "💬 **Thread** (4 replies, 3 users)");
    }

    #[rstest]
    #[case("U123456", "1704984000", "*(edited by @U123456 at 2024-01-11 14:40:00)*")]
    #[case("U123456", "", "*(edited by @U123456)*")]
    #[case("", "1704984000", "*(edited at 2024-01-11 14:40:00)*")]
    #[case("", "", "*(edited)*")]
    fn test_edit_info(#[case] user: &str, #[case] ts: &str, #[case] expected: &str) {
        let edit = EditRecord {
            user: user.to_string(),
            ts: ts.to_string(),
        };
        assert_eq!(render_edit_info(Some(&edit), &RenderContext::default()), expected);
    }

    #[test]
    fn test_no_edit_record() {
        assert_eq!(render_edit_info(None, &RenderContext::default()), "");
    }
}
