//! Prompt composition for the sommelier model

use sommelier_domain::{InventoryRow, RecommendationRequest};

/// Builds the recommendation prompt from candidate rows and the request
///
/// Pure: the same rows and request always give the same text. Row order is
/// whatever the selector produced.
pub struct PromptBuilder<'a> {
    rows: &'a [InventoryRow],
    request: &'a RecommendationRequest,
    is_fallback: bool,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(rows: &'a [InventoryRow], request: &'a RecommendationRequest) -> Self {
        Self {
            rows,
            request,
            is_fallback: false,
        }
    }

    /// Mark the rows as a whole-inventory fallback
    pub fn with_fallback(mut self, is_fallback: bool) -> Self {
        self.is_fallback = is_fallback;
        self
    }

    /// Build the complete prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Role and ground rules
        prompt.push_str(ROLE_INSTRUCTIONS);
        prompt.push_str("\n\n");
        prompt.push_str(CATALOG_RULE);
        prompt.push_str("\n\n");

        // 2. Stock table
        prompt.push_str("[매장 재고 데이터]\n");
        prompt.push_str(STOCK_TABLE_HEADER);
        prompt.push('\n');
        for row in self.rows {
            prompt.push_str(&stock_line(row));
            prompt.push('\n');
        }
        prompt.push('\n');

        // 3. Customer conditions
        prompt.push_str("[고객 조건]\n");
        prompt.push_str(&format!("- 가격대: {}\n", self.request.bucket.label()));
        prompt.push_str(&format!("- 취향: {}\n", self.request.taste.describe()));
        prompt.push_str(&format!(
            "- 요청: {}\n",
            self.request.query_text().unwrap_or(NO_REQUEST)
        ));
        prompt.push('\n');

        if self.is_fallback {
            prompt.push_str(FALLBACK_NOTE);
            prompt.push_str("\n\n");
        }

        // 4. Output structure
        prompt.push_str(OUTPUT_FORMAT);

        prompt
    }
}

/// One stock table line: `- 이름 | 종류 | 가격 | 기타`
fn stock_line(row: &InventoryRow) -> String {
    let category = row.category.as_deref().unwrap_or("-");
    let price = row
        .price_label()
        .map(|p| format!("{}원", p))
        .unwrap_or_else(|| "가격 미정".to_string());

    let mut line = format!("- {} | {} | {}", row.name, category, price);
    if !row.attributes.is_empty() {
        let extra: Vec<String> = row
            .attributes
            .iter()
            .map(|(column, value)| format!("{}: {}", column, value))
            .collect();
        line.push_str(" | ");
        line.push_str(&extra.join(", "));
    }
    line
}

const NO_REQUEST: &str = "없음";

const STOCK_TABLE_HEADER: &str = "이름 | 종류 | 가격 | 기타";

const ROLE_INSTRUCTIONS: &str = "너는 20년 경력의 친절한 마스터 소믈리에야. \
초보자도 이해하기 쉬운 언어로 우리 매장 재고에서 3가지를 추천해줘.";

const CATALOG_RULE: &str = "반드시 아래 [매장 재고 데이터]에 있는 와인만 추천해. \
목록에 없는 와인은 절대 언급하거나 지어내지 마. \
와인 이름은 목록에 적힌 그대로 써줘.";

const FALLBACK_NOTE: &str = "참고: 고객이 고른 가격대에 맞는 재고가 없어서 전체 재고를 보여준 거야. \
추천을 시작할 때 이 사실을 먼저 짧게 알려줘.";

const OUTPUT_FORMAT: &str = r#"아래 형식으로 답해줘.

✨ **마스터 소믈리에의 맞춤 추천 Top 3**

1️⃣ **와인 이름** (가격)
- **✅ 선정 이유**: (가장 먼저 설명)
- **🍷 초보자용 맛 표현**: (쉬운 단어로 친절하게)
- **👤 이런 분께 추천**: (상황이나 성향)
- **🍽️ 함께하면 맛있는 음식**: (구체적 메뉴)

2️⃣, 3️⃣ 도 같은 구조로 써줘.

마지막엔 "궁금하신 점은 직원을 불러주세요! 🍷"로 마무리해줘."#;

/// Closing line the model is asked to end with
pub const CLOSING_LINE: &str = "궁금하신 점은 직원을 불러주세요! 🍷";

#[cfg(test)]
mod tests {
    use super::*;
    use sommelier_domain::{PriceBucket, Scale, TastePreference};

    fn rows() -> Vec<InventoryRow> {
        vec![
            InventoryRow::new("Château Test 2019", Some(25_000.0))
                .with_category("레드")
                .with_attribute("재고", "3"),
            InventoryRow::new("Wine B", None),
        ]
    }

    #[test]
    fn test_prompt_lists_every_row_verbatim() {
        let rows = rows();
        let request = RecommendationRequest::default();
        let prompt = PromptBuilder::new(&rows, &request).build();

        assert!(prompt.contains("- Château Test 2019 | 레드 | 25,000원 | 재고: 3"));
        assert!(prompt.contains("- Wine B | - | 가격 미정"));
    }

    #[test]
    fn test_prompt_includes_conditions() {
        let rows = rows();
        let request = RecommendationRequest::new(
            PriceBucket::Low,
            TastePreference::sliders_at_rest().with_axis(
                sommelier_domain::TasteAxis::Body,
                Scale::Medium,
            ),
            "  삼겹살이랑 먹을 와인 ",
        );
        let prompt = PromptBuilder::new(&rows, &request).build();

        assert!(prompt.contains(&format!("- 가격대: {}", PriceBucket::Low.label())));
        assert!(prompt.contains("- 취향: 바디:중간"));
        assert!(prompt.contains("- 요청: 삼겹살이랑 먹을 와인\n"));
    }

    #[test]
    fn test_no_preference_and_blank_query() {
        let rows = rows();
        let request = RecommendationRequest::new(PriceBucket::All, TastePreference::NoPreference, "   ");
        let prompt = PromptBuilder::new(&rows, &request).build();

        assert!(prompt.contains("- 취향: 대중적 인기 와인"));
        assert!(prompt.contains("- 요청: 없음"));
    }

    #[test]
    fn test_catalog_rule_and_structure() {
        let rows = rows();
        let request = RecommendationRequest::default();
        let prompt = PromptBuilder::new(&rows, &request).build();

        assert!(prompt.contains("목록에 없는 와인은 절대"));
        for section in ["선정 이유", "초보자용 맛 표현", "이런 분께 추천", "함께하면 맛있는 음식"] {
            assert!(prompt.contains(section), "missing section {}", section);
        }
        assert!(prompt.contains(CLOSING_LINE));
    }

    #[test]
    fn test_fallback_note_only_when_flagged() {
        let rows = rows();
        let request = RecommendationRequest::default();

        let normal = PromptBuilder::new(&rows, &request).build();
        let fallback = PromptBuilder::new(&rows, &request).with_fallback(true).build();

        assert!(!normal.contains("전체 재고를 보여준"));
        assert!(fallback.contains("전체 재고를 보여준"));
    }

    #[test]
    fn test_stock_lines_come_only_from_rows() {
        let rows = rows();
        let request = RecommendationRequest::default();
        let prompt = PromptBuilder::new(&rows, &request).build();

        let stock: Vec<&str> = prompt
            .lines()
            .skip_while(|line| *line != STOCK_TABLE_HEADER)
            .skip(1)
            .take_while(|line| !line.is_empty())
            .collect();
        assert_eq!(stock.len(), rows.len());
        for (line, row) in stock.iter().zip(&rows) {
            assert!(line.starts_with(&format!("- {} |", row.name)));
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let rows = rows();
        let request = RecommendationRequest::default();
        let builder = PromptBuilder::new(&rows, &request);
        assert_eq!(builder.build(), builder.build());
    }
}
