//! Instruction text and response schema sent to the generation service.
//!
//! The rules are instructions to the model, not checks this crate makes:
//! reconciliation absorbs the cases where they are not followed.

use super::ManifestEntry;
use serde_json::{Value, json};

pub const SYSTEM_INSTRUCTION: &str = "You are a senior technical writer and information architect. \
Your goal is to organize documentation files into a user-friendly, navigable website structure.";

const RULES: &str = "\
Rules:
1. Group related files into categories (e.g., Introduction, Core Concepts, API Reference, Guides).
2. Determine a good order for reading (e.g., Installation before Advanced Usage).
3. CRITICAL: You MUST use the 'fileName' EXACTLY as provided in the input list. Do not change casing, extensions, or remove spaces. If the input is \"My File.md\", the fileName output must be \"My File.md\".
4. Create a professional 'siteTitle' and 'siteDescription' based on the content.
5. If a file seems like a landing page (index.md, readme.md, home.md), put it first or in a \"Welcome\" section.";

/// User prompt embedding the pretty-printed manifest.
pub fn user_prompt(manifest: &[ManifestEntry<'_>]) -> serde_json::Result<String> {
    let files = serde_json::to_string_pretty(manifest)?;
    Ok(format!(
        "I have a list of Markdown documentation files.\n\
         Please organize them into a logical documentation website structure.\n\n\
         Files provided:\n{files}\n\n{RULES}\n"
    ))
}

/// JSON schema of the expected response, in the service's schema dialect.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "siteTitle": {
                "type": "STRING",
                "description": "A catchy title for the documentation site based on the content."
            },
            "siteDescription": {
                "type": "STRING",
                "description": "A short, one-sentence tagline for the site."
            },
            "navigation": {
                "type": "ARRAY",
                "description": "The sidebar navigation structure grouped by logical categories.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "categoryName": {
                            "type": "STRING",
                            "description": "Name of the section (e.g., 'Getting Started', 'API')."
                        },
                        "items": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "title": {
                                        "type": "STRING",
                                        "description": "Clean display title for the page."
                                    },
                                    "fileName": {
                                        "type": "STRING",
                                        "description": "The EXACT filename from the input list corresponding to this page. Do not modify extension or casing."
                                    }
                                },
                                "required": ["title", "fileName"]
                            }
                        }
                    },
                    "required": ["categoryName", "items"]
                }
            }
        },
        "required": ["siteTitle", "siteDescription", "navigation"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_files_verbatim() {
        let manifest = [
            ManifestEntry {
                name: "My File.md",
                preview: "# Intro",
            },
            ManifestEntry {
                name: "API.MD",
                preview: "",
            },
        ];
        let prompt = user_prompt(&manifest).unwrap();
        assert!(prompt.contains("\"name\": \"My File.md\""));
        assert!(prompt.contains("\"name\": \"API.MD\""));
        assert!(prompt.contains("5. If a file seems like a landing page"));
    }

    #[test]
    fn test_schema_requires_all_fields() {
        let schema = response_schema();
        assert_eq!(
            schema["required"],
            json!(["siteTitle", "siteDescription", "navigation"])
        );
        let item = &schema["properties"]["navigation"]["items"]["properties"]["items"]["items"];
        assert_eq!(item["required"], json!(["title", "fileName"]));
    }
}
