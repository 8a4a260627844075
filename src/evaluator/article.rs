use super::extract::{extract_fields, extract_line, FieldSpec};
use super::types::{EnglishArticleResult, Grade};

const TITLE: &str = "title";
const TARGET_AUDIENCE: &str = "target_audience_score";
const PRODUCT_RELEVANCE: &str = "product_relevance_score";
const LEARNING_ADVICE: &str = "learning_advice_score";
const TOTAL: &str = "total_score";
const GRADE: &str = "grade";
const PAIN_POINTS: &str = "core_pain_points";

const FIELDS: &[FieldSpec] = &[
    FieldSpec::line(TITLE, "文章标题"),
    FieldSpec::number(TARGET_AUDIENCE, "目标人群相关性"),
    FieldSpec::number(PRODUCT_RELEVANCE, "产品定位相关性"),
    FieldSpec::number(LEARNING_ADVICE, "学习建议与经历分享"),
    FieldSpec::number(TOTAL, "总分"),
    FieldSpec::line(GRADE, "分级"),
    FieldSpec::line(PAIN_POINTS, "核心用户痛点"),
];

/// Labels tried in order for the match analysis; the first one with a
/// non-empty value wins.
pub const MATCH_ANALYSIS_LABELS: [&str; 4] = [
    "核心相关点/不相关点分析",
    "核心相关点分析",
    "核心匹配点/不匹配点分析",
    "核心匹配点分析",
];

/// Used when the reply has no learning-advice score.
pub const DEFAULT_LEARNING_ADVICE_SCORE: f64 = 5.0;

const TARGET_AUDIENCE_WEIGHT: f64 = 0.5;
const PRODUCT_RELEVANCE_WEIGHT: f64 = 0.3;
const LEARNING_ADVICE_WEIGHT: f64 = 0.2;

/// Weighted total used when the reply does not state one.
pub fn weighted_total(target_audience: f64, product_relevance: f64, learning_advice: f64) -> f64 {
    target_audience * TARGET_AUDIENCE_WEIGHT
        + product_relevance * PRODUCT_RELEVANCE_WEIGHT
        + learning_advice * LEARNING_ADVICE_WEIGHT
}

/// Splits the pain-point line on `、`, or on `,` when no `、` is present.
/// A line with neither separator is a single pain point.
pub fn split_pain_points(line: &str) -> Vec<String> {
    let line = line.trim();
    if line.is_empty() {
        return Vec::new();
    }
    let parts: Vec<&str> = if line.contains('、') {
        line.split('、').collect()
    } else if line.contains(',') {
        line.split(',').collect()
    } else {
        vec![line]
    };
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads a `分级` value, accepting only `S级`/`A级`/`B级`/`C级` at the start.
fn stated_grade(value: &str) -> Option<Grade> {
    let head: String = value.trim().chars().take(2).collect();
    head.parse().ok()
}

fn match_analysis(text: &str) -> String {
    MATCH_ANALYSIS_LABELS
        .iter()
        .find_map(|label| extract_line(text, label).filter(|value| !value.is_empty()))
        .unwrap_or_default()
}

/// Parses an English-learning article reply.
///
/// Total falls back to the weighted sum of the three sub-scores and the grade
/// to the bucket of the total, so both are always consistent with what the
/// reply provided.
pub fn parse_english_article(text: &str) -> EnglishArticleResult {
    let found = extract_fields(text, FIELDS);

    let target_audience_score = found.number(TARGET_AUDIENCE).unwrap_or(0.0);
    let product_relevance_score = found.number(PRODUCT_RELEVANCE).unwrap_or(0.0);
    let learning_advice_score = found
        .number(LEARNING_ADVICE)
        .unwrap_or(DEFAULT_LEARNING_ADVICE_SCORE);

    let total_score = found.number(TOTAL).unwrap_or_else(|| {
        weighted_total(
            target_audience_score,
            product_relevance_score,
            learning_advice_score,
        )
    });

    let grade = found
        .text(GRADE)
        .and_then(stated_grade)
        .unwrap_or_else(|| Grade::from_total(total_score));

    EnglishArticleResult {
        title: found.text(TITLE).unwrap_or_default().to_string(),
        target_audience_score,
        product_relevance_score,
        learning_advice_score,
        total_score,
        grade,
        match_analysis: match_analysis(text),
        core_pain_points: found
            .text(PAIN_POINTS)
            .map(split_pain_points)
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const FULL_REPLY: &str = "文章标题：《每天10分钟看新闻，零基础也能轻松学英语》
目标人群相关性：9
产品定位相关性：8
学习建议与经历分享：7
总分：8.3
分级：A级
核心相关点/不相关点分析：面向零基础用户，强调碎片化学习
核心用户痛点：没时间、方法不对、坚持不下去";

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn full_reply() {
        let result = parse_english_article(FULL_REPLY);
        assert_eq!(result.title, "《每天10分钟看新闻，零基础也能轻松学英语》");
        assert_eq!(result.target_audience_score, 9.0);
        assert_eq!(result.product_relevance_score, 8.0);
        assert_eq!(result.learning_advice_score, 7.0);
        assert_eq!(result.total_score, 8.3);
        assert_eq!(result.grade, Grade::A);
        assert_eq!(result.match_analysis, "面向零基础用户，强调碎片化学习");
        assert_eq!(
            result.core_pain_points,
            vec!["没时间", "方法不对", "坚持不下去"]
        );
    }

    #[test]
    fn total_is_weighted_when_absent() {
        let result =
            parse_english_article("目标人群相关性：8.0\n产品定位相关性：6.0\n学习建议与经历分享：5.0");
        assert!(approx(result.total_score, 8.0 * 0.5 + 6.0 * 0.3 + 5.0 * 0.2));
        assert!(approx(result.total_score, 6.8));
        assert_eq!(result.grade, Grade::B);
    }

    #[test]
    fn learning_advice_defaults_to_five() {
        let result = parse_english_article("目标人群相关性：10\n产品定位相关性：10");
        assert_eq!(result.learning_advice_score, 5.0);
        assert!(approx(result.total_score, 9.0));
        assert_eq!(result.grade, Grade::S);
    }

    #[test]
    fn unlabeled_reply_uses_defaults() {
        let result = parse_english_article("抱歉，我无法评估。");
        assert_eq!(result.title, "");
        assert_eq!(result.target_audience_score, 0.0);
        assert_eq!(result.product_relevance_score, 0.0);
        assert_eq!(result.learning_advice_score, 5.0);
        assert!(approx(result.total_score, 1.0));
        assert_eq!(result.grade, Grade::C);
        assert_eq!(result.match_analysis, "");
        assert!(result.core_pain_points.is_empty());
    }

    #[test]
    fn stated_grade_overrides_derived_one() {
        let result = parse_english_article("总分：4\n分级：S级");
        assert_eq!(result.grade, Grade::S);
    }

    #[test]
    fn invalid_stated_grade_is_derived() {
        let result = parse_english_article("总分：7.5\n分级：D级");
        assert_eq!(result.grade, Grade::A);
        let result = parse_english_article("总分：7.5\n分级：优秀");
        assert_eq!(result.grade, Grade::A);
    }

    #[test]
    fn stated_grade_may_carry_commentary() {
        let result = parse_english_article("总分：3\n分级：B级（接近A级）");
        assert_eq!(result.grade, Grade::B);
    }

    #[rstest]
    #[case("核心相关点/不相关点分析：甲\n核心匹配点分析：丁", "甲")]
    #[case("核心相关点分析：乙\n核心匹配点/不匹配点分析：丙", "乙")]
    #[case("核心匹配点/不匹配点分析：丙\n核心匹配点分析：丁", "丙")]
    #[case("核心匹配点分析：点A", "点A")]
    #[case("没有分析", "")]
    #[case("核心相关点/不相关点分析：\n核心匹配点分析：点A", "点A")]
    #[case("核心相关点分析：\n核心匹配点/不匹配点分析：丙", "丙")]
    #[case("核心相关点分析：\n  贴合产品定位\n核心匹配点分析：丁", "贴合产品定位")]
    fn match_analysis_label_priority(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(parse_english_article(text).match_analysis, expected);
    }

    #[test]
    fn match_analysis_priority_ignores_position() {
        let text = "核心匹配点分析：后备\n核心相关点分析：优先";
        assert_eq!(parse_english_article(text).match_analysis, "优先");
    }

    #[rstest]
    #[case("时间不足、方法错误", vec!["时间不足", "方法错误"])]
    #[case("busy,confused", vec!["busy", "confused"])]
    #[case("单一痛点", vec!["单一痛点"])]
    #[case("a、b,c", vec!["a", "b,c"])]
    #[case(" x , y ", vec!["x", "y"])]
    #[case("", vec![])]
    fn pain_point_splitting(#[case] line: &str, #[case] expected: Vec<&str>) {
        assert_eq!(split_pain_points(line), expected);
    }

    #[test]
    fn values_on_following_lines_are_read() {
        let text = "核心相关点/不相关点分析：\n核心匹配点分析：点A\n核心用户痛点：\n时间不足、方法错误";
        let result = parse_english_article(text);
        assert_eq!(result.match_analysis, "点A");
        assert_eq!(result.core_pain_points, vec!["时间不足", "方法错误"]);
    }

    #[test]
    fn full_width_scores_are_read() {
        let result = parse_english_article("目标人群相关性：８\n产品定位相关性：６\n学习建议与经历分享：５\n总分：６.８");
        assert_eq!(result.target_audience_score, 8.0);
        assert_eq!(result.total_score, 6.8);
        assert_eq!(result.grade, Grade::B);
    }

    #[test]
    fn pain_points_only_read_their_line() {
        let text = "核心用户痛点：时间不足、方法错误\n总分：6";
        let result = parse_english_article(text);
        assert_eq!(result.core_pain_points, vec!["时间不足", "方法错误"]);
        assert_eq!(result.total_score, 6.0);
    }
}
