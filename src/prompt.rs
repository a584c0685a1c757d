use serde::Serialize;

use crate::error::{TemplateError, ValidationError};

// One named input field of a generator form
#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    #[serde(skip)]
    pub missing_message: String,
}

impl FieldSpec {
    pub fn new(name: &str, label: &str, missing_message: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            missing_message: missing_message.to_string(),
        }
    }
}

/// Instruction text with `{field}` placeholders.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    text: String,
}

impl PromptTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    // Names between braces, in order of appearance, duplicates kept
    pub fn placeholders(&self) -> Vec<&str> {
        let mut found = Vec::new();
        let mut rest = self.text.as_str();
        while let Some(start) = rest.find('{') {
            let after = &rest[start + 1..];
            match after.find('}') {
                Some(end) => {
                    let name = &after[..end];
                    if !name.is_empty()
                        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                    {
                        found.push(name);
                    }
                    rest = &after[end + 1..];
                }
                None => break,
            }
        }
        found
    }

    pub fn render(&self, fields: &[FieldSpec], values: &[String]) -> String {
        fields.iter().enumerate().fold(self.text.clone(), |acc, (i, field)| {
            let value = values.get(i).map(String::as_str).unwrap_or("");
            acc.replace(&format!("{{{}}}", field.name), value)
        })
    }
}

/// Everything that distinguishes one generator feature from another.
#[derive(Debug, Clone)]
pub struct FeatureSpec {
    pub name: String,
    pub fields: Vec<FieldSpec>,
    pub template: PromptTemplate,
    pub empty_response_message: String,
    pub transport_message: String,
}

const TRANSPORT_MESSAGE: &str =
    "An error occurred while connecting to the API. Check your connection or try again later.";

impl FeatureSpec {
    // Values are positional; a missing trailing value counts as empty
    pub fn validate(&self, values: &[String]) -> Result<(), ValidationError> {
        for (i, field) in self.fields.iter().enumerate() {
            let blank = values.get(i).is_none_or(|v| v.trim().is_empty());
            if blank {
                return Err(ValidationError {
                    field: field.name.clone(),
                    message: field.missing_message.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn render_prompt(&self, values: &[String]) -> String {
        self.template.render(&self.fields, values)
    }

    pub fn check(&self) -> Result<(), TemplateError> {
        let placeholders = self.template.placeholders();
        if let Some(field) = self
            .fields
            .iter()
            .find(|f| !placeholders.contains(&f.name.as_str()))
        {
            return Err(TemplateError::UnusedField {
                feature: self.name.clone(),
                field: field.name.clone(),
            });
        }
        if let Some(unknown) = placeholders
            .iter()
            .find(|p| !self.fields.iter().any(|f| f.name == **p))
        {
            return Err(TemplateError::UnknownPlaceholder {
                feature: self.name.clone(),
                placeholder: unknown.to_string(),
            });
        }
        Ok(())
    }
}

pub fn slogan() -> FeatureSpec {
    FeatureSpec {
        name: "slogan".to_string(),
        fields: vec![FieldSpec::new(
            "description",
            "Product or service description",
            "Please describe your product or service to generate a slogan.",
        )],
        template: PromptTemplate::new(
            "Generate 3 short, punchy slogans for a product or service with the following \
             description: \"{description}\". The slogans should focus on sales and on attracting \
             customers. Separate them with a new line.",
        ),
        empty_response_message: "Could not generate the slogan. Please try again.".to_string(),
        transport_message: TRANSPORT_MESSAGE.to_string(),
    }
}

pub fn ad_copy() -> FeatureSpec {
    FeatureSpec {
        name: "ad-copy".to_string(),
        fields: vec![
            FieldSpec::new(
                "product",
                "Product or service",
                "Please fill in the product or service to generate the ad copy.",
            ),
            FieldSpec::new(
                "audience",
                "Target audience",
                "Please fill in the target audience to generate the ad copy.",
            ),
            FieldSpec::new(
                "benefit",
                "Main benefit",
                "Please fill in the main benefit to generate the ad copy.",
            ),
        ],
        template: PromptTemplate::new(
            "Generate 3 short, persuasive text options for an online ad.\n\
             Product/Service: \"{product}\"\n\
             Target audience: \"{audience}\"\n\
             Main benefit: \"{benefit}\"\n\
             The texts should focus on conversion and grab the audience's attention. \
             Separate each option with a new line.",
        ),
        empty_response_message: "Could not generate the ad copy. Please try again.".to_string(),
        transport_message: TRANSPORT_MESSAGE.to_string(),
    }
}
