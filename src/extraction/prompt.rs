//! Prompt assembly for the text-to-structured-data request.
//!
//! The remote service is only as constrained as the instruction it receives,
//! so the rules are explicit: match the schema exactly, use the declared
//! defaults for missing fields, strip currency symbols from amounts, and
//! emit no markdown wrapping.

use crate::extraction::schema::ExtractionSchema;

/// Formatting rules every extraction prompt carries.
pub const EXTRACTION_RULES: &str = "\
Rules:
- Ensure the JSON matches the provided format exactly
- Use empty string \"\" for missing text fields
- Use 0.0 for missing numeric fields
- Extract amounts as numbers without currency symbols
- Remove any markdown code blocks or backticks from the output";

/// Stricter preamble for backends that echo prose around their output.
const ONLY_JSON_RULE: &str = "- Return ONLY the JSON object, no other text or explanation";

/// Builds the extraction prompt for backends that take the schema as a
/// separate machine-readable request parameter.
pub fn extraction_prompt(text: &str) -> String {
    format!("Parse this text below into JSON:{text} \n and rules is {EXTRACTION_RULES}")
}

/// Builds the extraction prompt for backends without schema support,
/// inlining the schema's default-valued JSON template.
pub fn extraction_prompt_with_template(text: &str, schema: &ExtractionSchema) -> String {
    format!(
        "Parse this text below into JSON:{text} \n with format {} \n and rules is {EXTRACTION_RULES}\n{ONLY_JSON_RULE}",
        schema.template_json()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::schema::RECEIPT_SCHEMA;

    #[test]
    fn prompt_embeds_text_and_rules() {
        let prompt = extraction_prompt("Total: 45.50 USD");
        assert!(prompt.contains("Total: 45.50 USD"));
        assert!(prompt.contains("without currency symbols"));
        assert!(prompt.contains("markdown"));
    }

    #[test]
    fn template_prompt_inlines_the_schema() {
        let prompt = extraction_prompt_with_template("Bank: ABC", &RECEIPT_SCHEMA);
        assert!(prompt.contains("\"bank_name\""));
        assert!(prompt.contains("ONLY the JSON object"));
    }
}
