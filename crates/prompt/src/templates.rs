//! Fixed prompt templates.
//!
//! One answer template per intent plus the query-rewrite template. The
//! wording is part of the system's behaviour: editing a template changes
//! answers and must be treated as an API change.
//!
//! Every answer template has the same skeleton: a role line, an
//! only-from-context rule, the exact fallback line, then `Context:`,
//! `Question:` and a closing `Answer:` cue where generation begins.

use medask_core::Intent;

/// Handlebars source for an answer template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    /// Stable template identifier (`answer.<intent>` or `rewrite`)
    pub id: &'static str,

    /// Template body with `{{context}}` / `{{question}}` placeholders
    pub body: &'static str,
}

const SYMPTOMS: &str = r#"You are a biomedical expert.
Using ONLY the context, list ALL symptoms/signs mentioned, grouped logically (respiratory, neurological, cardiovascular, GI, mental health, etc.). Do not add anything not stated.
If no symptoms or signs are stated, say exactly: "I'm sorry, I cannot answer that question based on the provided information."

Context:
{{context}}

Question:
{{question}}

Answer:
"#;

const CAUSES: &str = r#"You are a biomedical expert.
Using ONLY the context, answer the question by listing the CAUSES/ETIOLOGY explicitly mentioned.
Rules:
- Extract only statements that indicate causation (e.g., "caused by", "due to", "results from").
- If causes are not directly stated, say exactly: "I'm sorry, I cannot answer that question based on the provided information."
- Be concise and structured (bullets).

Context:
{{context}}

Question:
{{question}}

Answer:
"#;

const TREATMENTS: &str = r#"You are a biomedical expert.
Using ONLY the context, summarize evidence-based treatments/management mentioned (drugs, interventions, dose notes if present).
If none are mentioned, say exactly: "I'm sorry, I cannot answer that question based on the provided information."

Context:
{{context}}

Question:
{{question}}

Answer:
"#;

const RISKS: &str = r#"You are a biomedical expert.
Using ONLY the context, list risk factors and associations mentioned.
If none are present, say exactly: "I'm sorry, I cannot answer that question based on the provided information."

Context:
{{context}}

Question:
{{question}}

Answer:
"#;

const MECHANISMS: &str = r#"You are a biomedical expert.
Using ONLY the context, explain the pathophysiology/mechanisms mentioned.
If mechanisms are not described, say exactly: "I'm sorry, I cannot answer that question based on the provided information."

Context:
{{context}}

Question:
{{question}}

Answer:
"#;

const DEFINITION: &str = r#"You are a biomedical expert.
Using ONLY the context, provide a crisp definition/description.
If no definitional text is present, say exactly: "I'm sorry, I cannot answer that question based on the provided information."

Context:
{{context}}

Question:
{{question}}

Answer:
"#;

const GENERAL: &str = r#"You are a biomedical expert.
Using ONLY the context, answer as clearly and completely as possible.
- Combine relevant points concisely.
- Do not invent information not in the context.
- If nothing in the context supports an answer, say exactly: "I'm sorry, I cannot answer that question based on the provided information."

Context:
{{context}}

Question:
{{question}}

Answer:
"#;

/// Query rewrite template; the model answers with `Option N: ...` lines.
pub const REWRITE: PromptTemplate = PromptTemplate {
    id: "rewrite",
    body: "Provide several specific rewritten versions of the biomedical question, \
ranging from broad to precise.\nOutput as 'Option 1', 'Option 2', etc.\n\n\
Question: {{question}}\nRewritten:",
};

/// Look up the answer template for an intent.
pub fn answer_template(intent: Intent) -> PromptTemplate {
    let (id, body) = match intent {
        Intent::Symptoms => ("answer.symptoms", SYMPTOMS),
        Intent::Causes => ("answer.causes", CAUSES),
        Intent::Treatments => ("answer.treatments", TREATMENTS),
        Intent::Risks => ("answer.risks", RISKS),
        Intent::Mechanisms => ("answer.mechanisms", MECHANISMS),
        Intent::Definition => ("answer.definition", DEFINITION),
        Intent::General => ("answer.general", GENERAL),
    };
    PromptTemplate { id, body }
}
