//! Sample categories and topics for a fresh database.

use rust_decimal::Decimal;
use sqlx::PgPool;
use ytopic_core::{CompetitionLevel, ContentType, NewCategory, NewTopic};

use crate::topics::insert_topics;
use crate::DbError;

/// Row counts written by [`seed_sample_data`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories: usize,
    pub topics: usize,
}

fn category(name: &str, display_name: &str, cpm_cents: i64, icon: &str, description: &str) -> NewCategory {
    NewCategory {
        name: name.to_string(),
        display_name: display_name.to_string(),
        avg_cpm: Decimal::new(cpm_cents, 2),
        icon: Some(icon.to_string()),
        description: Some(description.to_string()),
    }
}

/// The built-in category list.
#[must_use]
pub fn sample_categories() -> Vec<NewCategory> {
    vec![
        category("finance", "금융/투자", 1500, "DollarSign", "재테크, 투자 관련 컨텐츠"),
        category("education", "교육/강의", 1150, "BookOpen", "교육 및 강의 컨텐츠"),
        category("tech", "테크/리뷰", 900, "Cpu", "기술 리뷰 및 가이드"),
        category("health", "건강/피트니스", 750, "Heart", "운동 및 건강 관련"),
        category("cooking", "요리/레시피", 600, "ChefHat", "요리 레시피"),
        category("gaming", "게임", 400, "Gamepad2", "게임 컨텐츠"),
        category("entertainment", "엔터테인먼트", 350, "Sparkles", "예능 및 엔터테인먼트"),
    ]
}

/// Topic row fields in column order; scores are whole numbers.
type TopicFields<'a> = (
    &'a str,
    &'a str,
    ContentType,
    i64,
    CompetitionLevel,
    i64,
    i64,
    &'a [&'a str],
    (i32, i32),
);

fn topic(
    (title, category, content_type, score, competition_level, avg_views, cpm_cents, keywords, length): TopicFields<'_>,
) -> NewTopic {
    NewTopic {
        title: title.to_string(),
        category: category.to_string(),
        content_type,
        revenue_score: Decimal::from(score),
        competition_level,
        avg_views,
        estimated_cpm: Decimal::new(cpm_cents, 2),
        trending_keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        video_length_min: length.0,
        video_length_max: length.1,
    }
}

/// The built-in sample topics, three short-form and three long-form.
#[must_use]
pub fn sample_topics() -> Vec<NewTopic> {
    use CompetitionLevel::{Low, Medium};
    use ContentType::{Long, Short};

    [
        ("5분 재테크 팁", "금융/투자", Short, 9, Low, 150_000, 1500, &["재테크", "투자", "절약", "돈모으기"][..], (30, 60)),
        ("AI 도구 활용법", "테크", Short, 8, Low, 120_000, 1200, &["AI", "인공지능", "생산성", "도구"][..], (40, 60)),
        ("1분 요리 레시피", "요리", Short, 7, Medium, 200_000, 600, &["요리", "레시피", "간단요리", "1분요리"][..], (45, 60)),
        ("부동산 투자 완벽 가이드", "금융/투자", Long, 10, Low, 80_000, 1800, &["부동산", "투자", "재테크", "자산관리"][..], (900, 1500)),
        ("프로그래밍 강의 시리즈", "교육", Long, 9, Medium, 100_000, 1400, &["코딩", "프로그래밍", "개발", "교육"][..], (1200, 2400)),
        ("제품 리뷰 & 언박싱", "테크/리뷰", Long, 8, Medium, 150_000, 900, &["리뷰", "언박싱", "제품리뷰", "가젯"][..], (600, 900)),
    ]
    .into_iter()
    .map(topic)
    .collect()
}

/// Trend-based topics added on top of the samples, four short-form and
/// four long-form.
#[must_use]
pub fn trending_topics() -> Vec<NewTopic> {
    use CompetitionLevel::{High, Low, Medium};
    use ContentType::{Long, Short};

    [
        ("60초 영어 회화", "education", Short, 8, Low, 130_000, 1100, &["영어", "영어회화", "영어공부", "60초"][..], (45, 60)),
        ("주식 차트 분석 팁", "finance", Short, 9, Medium, 170_000, 1400, &["주식", "차트", "투자", "재테크"][..], (30, 45)),
        ("게임 꿀팁 모음", "gaming", Short, 6, High, 250_000, 400, &["게임", "꿀팁", "공략", "게이밍"][..], (30, 60)),
        ("심리 실험", "education", Short, 7, Medium, 190_000, 900, &["심리학", "실험", "교육", "흥미"][..], (40, 60)),
        ("AI 부업으로 월 100만원", "tech", Long, 9, Low, 95_000, 1300, &["AI", "부업", "사이드프로젝트", "수익화"][..], (900, 1200)),
        ("주식 기초부터 실전까지", "finance", Long, 10, Medium, 110_000, 1700, &["주식", "투자", "초보", "실전"][..], (1500, 2400)),
        ("영어 독학 완벽 가이드", "education", Long, 9, Low, 85_000, 1200, &["영어", "독학", "공부법", "교육"][..], (1200, 1800)),
        ("N잡러의 하루 루틴", "entertainment", Long, 6, High, 200_000, 400, &["N잡", "Vlog", "일상", "루틴"][..], (600, 900)),
    ]
    .into_iter()
    .map(topic)
    .collect()
}

/// Inserts [`trending_topics`] unconditionally and returns the row count.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn add_trending_topics(pool: &PgPool) -> Result<usize, DbError> {
    insert_topics(pool, &trending_topics()).await
}

/// Upserts the sample categories and, when the topics table is empty,
/// inserts the sample topics. Safe to run repeatedly.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any database operation fails.
pub async fn seed_sample_data(pool: &PgPool) -> Result<SeedSummary, DbError> {
    let categories = sample_categories();
    let mut tx = pool.begin().await?;

    for category in &categories {
        sqlx::query(
            "INSERT INTO categories (name, display_name, avg_cpm, icon, description) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (name) DO UPDATE SET \
                 display_name = EXCLUDED.display_name, \
                 avg_cpm = EXCLUDED.avg_cpm, \
                 icon = EXCLUDED.icon, \
                 description = EXCLUDED.description",
        )
        .bind(&category.name)
        .bind(&category.display_name)
        .bind(category.avg_cpm)
        .bind(&category.icon)
        .bind(&category.description)
        .execute(&mut *tx)
        .await?;
    }

    let existing_topics = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM topics")
        .fetch_one(&mut *tx)
        .await?;
    tx.commit().await?;

    let topics = if existing_topics == 0 {
        insert_topics(pool, &sample_topics()).await?
    } else {
        0
    };

    Ok(SeedSummary {
        categories: categories.len(),
        topics,
    })
}
