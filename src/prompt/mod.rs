pub const EXCERPT_START: &str = "--- source excerpt start ---";
pub const EXCERPT_END: &str = "--- source excerpt end ---";

/// System framing for the chat exchange. The model plays a QA engineer whose
/// output is destined for spreadsheet rows, which keeps the step/result lists
/// terse enough to render one cell each.
pub fn system_prompt() -> &'static str {
    "You are a seasoned QA engineer. Organize manual test cases from the given \
     material and answer in a form that expands directly into spreadsheet rows \
     that testers can execute and record against."
}

fn schema_block() -> &'static str {
    r#"Answer strictly following this JSON schema:
{
  "test_cases": [
    {
      "test_id": "TC-001",
      "title": "Title of the test case",
      "objective": "What the test verifies",
      "preconditions": ["Preconditions and test data"],
      "steps": ["Steps listed in execution order"],
      "expected_results": ["Expected results as bullet items"],
      "priority": "One of High | Medium | Low",
      "notes": "Remarks and points to check"
    }
  ]
}
Output JSON only, with no surrounding prose or explanation.
Avoid redundancy where possible, and organize the cases so testers can easily record execution status."#
}

/// Deterministic prompt assembly: same inputs, same string. Sections appear in
/// fixed order; the context block is present only when context is non-empty.
pub fn build_user_prompt(source_url: &str, source_text: &str, context: &str) -> String {
    let mut sections = vec![
        "Extract and organize manual test cases from the primary source below.".to_string(),
        format!("Primary source URL: {source_url}"),
        EXCERPT_START.to_string(),
        source_text.to_string(),
        EXCERPT_END.to_string(),
    ];

    if !context.is_empty() {
        sections.push(format!("Additional context: {context}"));
    }

    sections.push(schema_block().to_string());

    sections.join("\n\n")
}
