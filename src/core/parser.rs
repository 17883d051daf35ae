//! Line-oriented field extraction for hero descriptor files.
//!
//! Four independent rules, each taking the first matching line of the whole
//! text. The hero name is the one exception: it is only looked for above the
//! `skills:` header, since the payload below is full of `key:` lines.

use crate::domain::model::Hero;

const SKILLS_TOKEN: &str = "skills:";
const COLOURED_NAME_TOKEN: &str = "colouredName:";

struct Line<'a> {
    text: &'a str,
    /// Byte offset of the first character after this line's terminator.
    next_offset: usize,
    has_newline: bool,
}

fn lines(text: &str) -> Vec<Line<'_>> {
    let mut offset = 0;
    text.split_inclusive('\n')
        .map(|raw| {
            offset += raw.len();
            let has_newline = raw.ends_with('\n');
            let body = raw.strip_suffix('\n').unwrap_or(raw);
            let body = body.strip_suffix('\r').unwrap_or(body);
            Line {
                text: body,
                next_offset: offset,
                has_newline,
            }
        })
        .collect()
}

fn trim_leading_spaces(line: &str) -> &str {
    line.trim_start_matches(' ')
}

/// Content after at least one leading space; `None` for a line at column 0.
fn indented(line: &str) -> Option<&str> {
    line.starts_with(' ').then(|| trim_leading_spaces(line))
}

fn is_skills_header(line: &str) -> bool {
    indented(line)
        .and_then(|content| content.strip_prefix(SKILLS_TOKEN))
        .is_some_and(|rest| rest.chars().all(|c| c == ' '))
}

fn schema_header(line: &str) -> Option<String> {
    trim_leading_spaces(line)
        .starts_with('#')
        .then(|| line.to_string())
}

fn primary_name(line: &str) -> Option<String> {
    if is_skills_header(line) {
        return None;
    }
    let name = line.trim_end_matches(' ').strip_suffix(':')?;
    (!name.is_empty() && !name.contains('#')).then(|| name.to_string())
}

fn display_name(line: &str) -> Option<String> {
    indented(line)?
        .strip_prefix(COLOURED_NAME_TOKEN)
        .map(|rest| trim_leading_spaces(rest).to_string())
}

/// Extracts the descriptor fields from one raw text blob. Never fails; a
/// field whose rule matches no line is left absent.
pub fn parse(raw_text: &str) -> Hero {
    let text = raw_text.trim_end();
    let lines = lines(text);

    let skills_at = lines
        .iter()
        .position(|line| line.has_newline && is_skills_header(line.text));
    let above_skills = &lines[..skills_at.unwrap_or(lines.len())];

    Hero {
        schema_header: lines.iter().find_map(|line| schema_header(line.text)),
        primary_name: above_skills.iter().find_map(|line| primary_name(line.text)),
        display_name: lines.iter().find_map(|line| display_name(line.text)),
        skills_block: skills_at.map(|i| text[lines[i].next_offset..].to_string()),
    }
}
