use crate::ai::classifier::classify;

pub fn build_architecture_prompt(user_input: &str) -> String {
    let architecture_hint = classify(user_input);

    format!(
        r#"
You are a senior software architect.

System Type:
{}

Analyze:
- Architecture
- Database
- Security
- Scalability
- Risks

System Description:
{}

Respond in clean markdown.
"#,
        architecture_hint.label(),
        user_input
    )
}
