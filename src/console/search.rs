use super::table::SwitchTable;
use crate::model::Switch;

/// 查询与文本的匹配得分，大于 0 即视为相关
pub trait Scorer: Send + Sync {
    fn score(&self, text: &str, query: &str) -> f64;
}

/// Quicksilver 风格的缩写匹配得分，范围 [0, 1]，不区分大小写
#[derive(Debug, Clone, Copy, Default)]
pub struct QuicksilverScorer;

impl Scorer for QuicksilverScorer {
    fn score(&self, text: &str, query: &str) -> f64 {
        let text: Vec<char> = text.to_lowercase().chars().collect();
        let query: Vec<char> = query.to_lowercase().chars().collect();
        quicksilver(&text, &query, 0)
    }
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn find(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len()).find(|&start| &haystack[start..start + needle.len()] == needle)
}

fn quicksilver(text: &[char], abbreviation: &[char], offset: usize) -> f64 {
    if abbreviation.is_empty() {
        return 0.9;
    }
    if abbreviation.len() > text.len() {
        return 0.0;
    }

    for i in (1..=abbreviation.len()).rev() {
        let prefix = &abbreviation[..i];
        let Some(index) = find(text, prefix) else {
            continue;
        };
        if index + abbreviation.len() > text.len() + offset {
            continue;
        }

        let rest = &text[index + prefix.len()..];
        let remaining = quicksilver(rest, &abbreviation[i..], offset + index);
        if remaining > 0.0 {
            let mut score = (text.len() - rest.len()) as f64;
            if index != 0 {
                if is_blank(text[index - 1]) {
                    // 词首匹配：只对前面的字符做轻微扣分
                    for &c in text[..index - 1].iter().rev() {
                        score -= if is_blank(c) { 1.0 } else { 0.15 };
                    }
                } else {
                    score -= index as f64;
                }
            }
            score += remaining * rest.len() as f64;
            return score / text.len() as f64;
        }
    }
    0.0
}

/// 行的相关度：key、label、description（非空时）三者得分之和
pub fn relevance(scorer: &dyn Scorer, switch: &Switch, query: &str) -> f64 {
    let mut score = scorer.score(&switch.key, query) + scorer.score(&switch.label, query);
    if let Some(description) = switch.description.as_deref().filter(|d| !d.is_empty()) {
        score += scorer.score(description, query);
    }
    score
}

/// 按查询过滤表格，返回可见行数
///
/// 空查询清除所有隐藏标记；否则得分为 0 的行被隐藏。
pub fn apply_filter(table: &mut SwitchTable, scorer: &dyn Scorer, query: &str) -> usize {
    for row in table.rows_mut() {
        row.hidden = false;
    }
    if query.is_empty() {
        return table.len();
    }
    for row in table.rows_mut() {
        row.hidden = !matches_query(scorer, &row.switch, query);
    }
    table.rows().iter().filter(|row| !row.hidden).count()
}

/// 空查询匹配所有行
pub fn matches_query(scorer: &dyn Scorer, switch: &Switch, query: &str) -> bool {
    query.is_empty() || relevance(scorer, switch, query) > 0.0
}
