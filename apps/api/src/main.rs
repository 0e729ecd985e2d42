use member_search_api::config::AppConfig;
use member_search_api::domain::member::MemberSearchCondition;
use member_search_api::domain::page::{Order, PageRequest, Sort};
use member_search_api::domain::repositories::MemberSearchRepository;
use member_search_api::infrastructure::repositories::PostgresMemberRepository;
use member_search_api::infrastructure::schema;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("member_search_api=info")),
        )
        .init();

    let config = AppConfig::from_env();

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Database connected successfully");

    schema::ensure_schema(&pool).await?;
    if config.seed_sample_data {
        schema::seed_sample_data(&pool).await?;
    }

    let repo = PostgresMemberRepository::new(pool);
    let condition = MemberSearchCondition::new()
        .with_team_name("teamB")
        .with_age_goe(35)
        .with_age_loe(40);
    let page = PageRequest::new(0, 3)?.with_sort(Sort::by(Order::desc("age")));

    let by_apply_page = repo.search_page_by_apply_page(&condition, &page).await?;
    let simple = repo.search_page_simple(&condition, &page).await?;
    let complex = repo.search_page_complex(&condition, &page).await?;

    for (strategy, result) in [
        ("apply_page", &by_apply_page),
        ("simple", &simple),
        ("complex", &complex),
    ] {
        tracing::info!(
            strategy,
            total = result.total_elements,
            pages = result.total_pages(),
            returned = result.number_of_elements(),
            "search finished"
        );
        for row in &result.content {
            tracing::info!(
                username = %row.username,
                age = row.age,
                team = row.team_name.as_deref().unwrap_or("-"),
                "member"
            );
        }
    }

    Ok(())
}
