//! MCP Prompt Types
//!
//! Argument types and message text for the registered prompts.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Arguments for code_review
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CodeReviewArgs {
    /// The code to review
    pub code: String,
}

/// Render the code review request for `code`.
pub fn code_review_text(code: &str) -> String {
    format!(
        "🔍 **종합 코드 리뷰**

다음 코드를 상세히 분석하고 리뷰해주세요:

**검토 항목**:
1. **코드 구조 및 설계**
   - 아키텍처 패턴 적용
   - 모듈화 및 의존성 관리
   - SOLID 원칙 준수

2. **코드 품질**
   - 변수명 및 함수명 적절성
   - 코드 중복 제거
   - 에러 처리 방식

3. **성능 최적화**
   - 알고리즘 효율성
   - 자원 사용 최적화
   - 병목 지점 식별

4. **보안 고려사항**
   - 입력 데이터 검증
   - 인증/인가 처리
   - 민감 정보 보호

5. **가독성 및 유지보수성**
   - 코드 가독성 및 일관성
   - 주석 및 문서화
   - 테스트 가능성
   - 확장성 고려

**리뷰 대상 코드**:
```
{code}
```

각 항목에 대해 구체적인 피드백과 개선 제안을 제공해주세요. 좋은 부분은 칭찬하고, 개선이 필요한 부분은 구체적인 해결 방안을 제시해주세요."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_is_fenced() {
        let text = code_review_text("fn main() {}");
        assert!(text.contains("```\nfn main() {}\n```"));
        assert!(text.starts_with("🔍 **종합 코드 리뷰**"));
    }

    #[test]
    fn test_all_review_areas_present() {
        let text = code_review_text("");
        for area in [
            "코드 구조 및 설계",
            "코드 품질",
            "성능 최적화",
            "보안 고려사항",
            "가독성 및 유지보수성",
        ] {
            assert!(text.contains(area), "missing review area: {area}");
        }
    }

    #[test]
    fn test_code_is_embedded_verbatim() {
        let code = "let x = \"{not a placeholder}\";";
        assert!(code_review_text(code).contains(code));
    }
}
