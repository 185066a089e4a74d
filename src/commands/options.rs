use crate::commands::Out;
use crate::display::format_options;
use crate::engine::FilterOptions;
use crate::model::category::SUGGESTED;
use crate::{Config, Result};
use serde::Serialize;

/// The filter choices derived from the stored expenses, plus suggested category names.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Options {
    #[serde(flatten)]
    pub filters: FilterOptions,
    pub suggested_categories: Vec<&'static str>,
}

pub async fn options(config: Config) -> Result<Out<Options>> {
    let filters = config.tracker().filter_options().await?;
    let message = format_options(&filters, SUGGESTED);
    Ok(Out::new(
        message,
        Options {
            filters,
            suggested_categories: SUGGESTED.to_vec(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_options() {
        let env = TestEnv::new().await;
        env.insert_march().await;
        env.insert_expense("2022-08-08", "1", "Books").await;

        let out = options(env.config()).await.unwrap();
        let options = out.structure().unwrap();
        assert_eq!(options.filters.years, vec![2022, 2024]);
        let categories: Vec<&str> = options.filters.categories.iter().map(|c| c.as_str()).collect();
        assert_eq!(categories, vec!["Books", "Groceries", "Transport"]);
        assert_eq!(options.suggested_categories.len(), SUGGESTED.len());
        assert!(out.message().contains("Categories: Books, Groceries, Transport"));
    }

    #[tokio::test]
    async fn test_options_json_is_flat() {
        let env = TestEnv::new().await;
        env.insert_march().await;
        let out = options(env.config()).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&out.to_json().unwrap()).unwrap();
        assert_eq!(value["years"][0], 2024);
        assert_eq!(value["months"][11], "december");
        assert!(value["suggested_categories"].is_array());
    }
}
