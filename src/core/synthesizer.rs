use crate::domain::model::{Hero, SynthesizedDescriptor};

pub const NAME_SEPARATOR: &str = "And";
pub const DISPLAY_NAME_SEPARATOR: &str = " + ";
pub const DESCRIPTOR_EXTENSION: &str = ".yml";

// Absent fields render as "".
fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

pub fn combined_name(group: &[&Hero]) -> String {
    group
        .iter()
        .map(|hero| field(&hero.primary_name))
        .collect::<Vec<_>>()
        .join(NAME_SEPARATOR)
}

pub fn combined_display_name(group: &[&Hero]) -> String {
    group
        .iter()
        .map(|hero| field(&hero.display_name))
        .collect::<Vec<_>>()
        .join(DISPLAY_NAME_SEPARATOR)
}

/// "A combination of A, B, and C". Two heroes keep the comma: "A, and B".
pub fn combined_description(group: &[&Hero]) -> String {
    let mut description = String::from("A combination of ");
    if let Some((last, rest)) = group.split_last() {
        for hero in rest {
            description.push_str(field(&hero.display_name));
            description.push_str(", ");
        }
        description.push_str("and ");
        description.push_str(field(&last.display_name));
    } else {
        description.push_str("and ");
    }
    description
}

pub fn combined_skills(group: &[&Hero]) -> String {
    let mut skills = group
        .iter()
        .map(|hero| field(&hero.skills_block))
        .collect::<Vec<_>>()
        .join("\n");
    skills.push('\n');
    skills
}

/// Builds the descriptor for one ordered group of heroes. The schema header
/// comes from the first hero of the group.
pub fn combine(group: &[&Hero]) -> SynthesizedDescriptor {
    let name = combined_name(group);
    let schema = group
        .first()
        .map(|hero| field(&hero.schema_header))
        .unwrap_or("");

    let content = format!(
        "{}\n{}: \n  colouredName: {}\n  description: {}\n  skills: \n{}",
        schema,
        name,
        combined_display_name(group),
        combined_description(group),
        combined_skills(group),
    );

    SynthesizedDescriptor {
        file_name: format!("{}{}", name, DESCRIPTOR_EXTENSION),
        content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero(name: &str, display: &str) -> Hero {
        Hero {
            schema_header: Some(String::new()),
            primary_name: Some(name.to_string()),
            display_name: Some(display.to_string()),
            skills_block: Some(String::new()),
        }
    }

    #[test]
    fn test_two_heroes() {
        let alice = hero("Alice", "&7Alice");
        let bob = hero("Bob", "&7Bob");

        let descriptor = combine(&[&alice, &bob]);

        assert_eq!(descriptor.file_name, "AliceAndBob.yml");
        assert!(descriptor
            .content
            .contains("A combination of &7Alice, and &7Bob"));
        assert!(descriptor.content.contains("colouredName: &7Alice + &7Bob"));
    }

    #[test]
    fn test_three_heroes_description() {
        let a = hero("A", "a");
        let b = hero("B", "b");
        let c = hero("C", "c");
        assert_eq!(
            combined_description(&[&a, &b, &c]),
            "A combination of a, b, and c"
        );
        assert_eq!(combined_name(&[&a, &b, &c]), "AAndBAndC");
    }

    #[test]
    fn test_full_content_layout() {
        let alice = Hero {
            schema_header: Some("# $schema=hero.json".to_string()),
            primary_name: Some("Alice".to_string()),
            display_name: Some("&7Alice".to_string()),
            skills_block: Some("    - slash".to_string()),
        };
        let bob = Hero {
            schema_header: Some("# other schema".to_string()),
            primary_name: Some("Bob".to_string()),
            display_name: Some("&9Bob".to_string()),
            skills_block: Some("    - block\n    - parry".to_string()),
        };

        let descriptor = combine(&[&alice, &bob]);

        assert_eq!(
            descriptor.content,
            "# $schema=hero.json\n\
AliceAndBob: \n\
\x20 colouredName: &7Alice + &9Bob\n\
\x20 description: A combination of &7Alice, and &9Bob\n\
\x20 skills: \n\
\x20   - slash\n    - block\n    - parry\n"
        );
    }

    #[test]
    fn test_absent_fields_render_empty() {
        let blank = Hero::default();
        let descriptor = combine(&[&blank, &blank]);

        assert_eq!(descriptor.file_name, "And.yml");
        assert_eq!(
            descriptor.content,
            "\nAnd: \n  colouredName:  + \n  description: A combination of , and \n  skills: \n\n\n"
        );
        assert!(!descriptor.content.contains("undefined"));
    }

    #[test]
    fn test_empty_group_does_not_panic() {
        let descriptor = combine(&[]);
        assert_eq!(descriptor.file_name, ".yml");
        assert!(descriptor.content.contains("description: A combination of and "));
    }
}
