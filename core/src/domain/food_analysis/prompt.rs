pub const ANALYSIS_SYSTEM_PROMPT: &str =
    "You are an expert in analysing leftover food. Answer in JSON only.";

pub const ANALYSIS_INSTRUCTION: &str =
    "Look at this food photo and analyse, as JSON, what kind of food it is and how much of it was left over.";

pub const PARSE_FAILURE_SUGGESTION: &str = "LLM 출력 파싱 실패";

pub const DISABLED_ANALYSIS_NOTE: &str = "LLM disabled - returning dummy analysis";

pub const DISABLED_REPORT: &str = "LLM 비활성 상태: 더미 리포트입니다. 실제 분석 모델을 활성화하면 상세 리포트가 생성됩니다.";

pub const DISABLED_IMPROVEMENTS: [&str; 2] =
    ["모델 API 키 설정 후 재실행", "샘플 이미지를 다양화하여 테스트"];

pub const PLACEHOLDER_REPORT: &str = "샘플 리포트 (모델 비활성 상태)";

pub const PLACEHOLDER_IMPROVEMENTS: [&str; 2] = ["메뉴 구성 최적화", "분량 조절"];

const COMBINED_TEMPLATE: &str = r#"
Analysis result: {analysis}

1) Write a plain-text report about the leftover food.
2) Always write 1 to 3 improvement suggestions as a JSON array.
3) Never leave improvements empty.
4) Return pure JSON only. Never include Markdown, lists or bullet points.

Example output (JSON):
{
  "report": "오늘 제공된 음식의 잔반이 ...",
  "improvements": [
    {"suggestion": "샐러드 양 조절"},
    {"suggestion": "드레싱 종류 다양화"}
  ]
}
"#;

/// Second-stage prompt: report plus improvement suggestions for a raw analysis.
pub fn combined_prompt(analysis: &str) -> String {
    COMBINED_TEMPLATE.replace("{analysis}", analysis)
}
