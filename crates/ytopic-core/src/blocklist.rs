//! Static keyword denylist.
//!
//! Matching is case-insensitive substring containment, scanned in table
//! order; the first rule whose pattern occurs anywhere in the keyword wins.
//! Containment deliberately over-matches (`"essex"` hits the `"sex"` rule).

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockCategory {
    Adult,
    Violence,
    Illegal,
    Copyright,
    Spam,
}

impl BlockCategory {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BlockCategory::Adult => "adult",
            BlockCategory::Violence => "violence",
            BlockCategory::Illegal => "illegal",
            BlockCategory::Copyright => "copyright",
            BlockCategory::Spam => "spam",
        }
    }
}

impl std::fmt::Display for BlockCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One denylist rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockedKeyword {
    pub pattern: &'static str,
    pub category: BlockCategory,
    pub reason: &'static str,
}

const ADULT: &str = "성인 콘텐츠";
const VIOLENT: &str = "폭력 콘텐츠";
const HATE: &str = "혐오 표현";
const ILLEGAL: &str = "불법 활동";
const COPYRIGHT: &str = "저작권 침해";
const SPAM: &str = "스팸/사기";
const DANGEROUS: &str = "위험 콘텐츠";

const fn rule(
    pattern: &'static str,
    category: BlockCategory,
    reason: &'static str,
) -> BlockedKeyword {
    BlockedKeyword {
        pattern,
        category,
        reason,
    }
}

use BlockCategory::{Adult, Copyright, Illegal, Spam, Violence};

/// Denylist in match-priority order.
pub const BLOCKED_KEYWORDS: &[BlockedKeyword] = &[
    rule("성인", Adult, ADULT),
    rule("19금", Adult, ADULT),
    rule("야동", Adult, ADULT),
    rule("포르노", Adult, ADULT),
    rule("porn", Adult, ADULT),
    rule("sex", Adult, ADULT),
    rule("xxx", Adult, ADULT),
    rule("섹스", Adult, ADULT),
    rule("음란", Adult, ADULT),
    rule("야한", Adult, ADULT),
    rule("폭력", Violence, VIOLENT),
    rule("살인", Violence, VIOLENT),
    rule("테러", Violence, VIOLENT),
    rule("자살", Violence, VIOLENT),
    rule("학대", Violence, VIOLENT),
    rule("고문", Violence, VIOLENT),
    rule("혐오", Violence, HATE),
    rule("violence", Violence, VIOLENT),
    rule("murder", Violence, VIOLENT),
    rule("suicide", Violence, VIOLENT),
    rule("마약", Illegal, ILLEGAL),
    rule("도박", Illegal, ILLEGAL),
    rule("해킹", Illegal, ILLEGAL),
    rule("불법", Illegal, ILLEGAL),
    rule("사기", Illegal, ILLEGAL),
    rule("탈세", Illegal, ILLEGAL),
    rule("위조", Illegal, ILLEGAL),
    rule("밀수", Illegal, ILLEGAL),
    rule("drug", Illegal, ILLEGAL),
    rule("gambling", Illegal, ILLEGAL),
    rule("hacking", Illegal, ILLEGAL),
    rule("illegal", Illegal, ILLEGAL),
    rule("scam", Illegal, ILLEGAL),
    rule("범죄", Illegal, ILLEGAL),
    rule("영화 다운로드", Copyright, COPYRIGHT),
    rule("드라마 다운로드", Copyright, COPYRIGHT),
    rule("음악 다운로드", Copyright, COPYRIGHT),
    rule("무료 다운로드", Copyright, COPYRIGHT),
    rule("토렌트", Copyright, COPYRIGHT),
    rule("불법 다운로드", Copyright, COPYRIGHT),
    rule("torrent", Copyright, COPYRIGHT),
    rule("piracy", Copyright, COPYRIGHT),
    rule("crack", Copyright, COPYRIGHT),
    rule("크랙", Copyright, COPYRIGHT),
    rule("무료 영화", Copyright, COPYRIGHT),
    rule("무료 드라마", Copyright, COPYRIGHT),
    rule("조회수 늘리기", Spam, SPAM),
    rule("구독자 늘리기", Spam, SPAM),
    rule("무료 돈", Spam, SPAM),
    rule("쉽게 돈 버는 법", Spam, SPAM),
    rule("클릭만 하면", Spam, SPAM),
    rule("보증금 없이", Spam, SPAM),
    rule("투자 100% 수익", Spam, SPAM),
    rule("view bot", Spam, SPAM),
    rule("subscriber bot", Spam, SPAM),
    rule("easy money", Spam, SPAM),
    rule("get rich quick", Spam, SPAM),
    rule("좋아요 늘리기", Spam, SPAM),
    rule("무기", Violence, DANGEROUS),
    rule("총기", Violence, DANGEROUS),
    rule("폭탄", Violence, DANGEROUS),
    rule("weapon", Violence, DANGEROUS),
    rule("gun", Violence, DANGEROUS),
    rule("bomb", Violence, DANGEROUS),
];

/// Returns the first denylist rule contained in `keyword`, if any.
///
/// The keyword is trimmed and lowercased before the scan.
#[must_use]
pub fn find_blocked_keyword(keyword: &str) -> Option<&'static BlockedKeyword> {
    let normalized = keyword.trim().to_lowercase();
    BLOCKED_KEYWORDS
        .iter()
        .find(|rule| normalized.contains(&rule.pattern.to_lowercase()))
}

/// Per-category rule counts plus the table total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlocklistStats {
    pub adult: usize,
    pub violence: usize,
    pub illegal: usize,
    pub copyright: usize,
    pub spam: usize,
    pub total: usize,
}

#[must_use]
pub fn blocked_keyword_stats() -> BlocklistStats {
    let mut stats = BlocklistStats {
        total: BLOCKED_KEYWORDS.len(),
        ..BlocklistStats::default()
    };
    for rule in BLOCKED_KEYWORDS {
        match rule.category {
            Adult => stats.adult += 1,
            Violence => stats.violence += 1,
            Illegal => stats.illegal += 1,
            Copyright => stats.copyright += 1,
            Spam => stats.spam += 1,
        }
    }
    stats
}
