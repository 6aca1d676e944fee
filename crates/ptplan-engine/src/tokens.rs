use crate::provider::TokenCount;

/// Per-million-token prices in USD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPricing {
    pub input_per_million: f64,
    pub output_per_million: f64,
}

impl ModelPricing {
    pub fn estimate_cost(&self, tokens: TokenCount) -> f64 {
        (tokens.input_tokens as f64 * self.input_per_million
            + tokens.output_tokens as f64 * self.output_per_million)
            / 1_000_000.0
    }
}

/// Known model pricing (per million tokens).
/// These are approximate and should be updated as pricing changes.
pub fn get_pricing(model_id: &str) -> Option<ModelPricing> {
    match model_id {
        id if id.contains("claude-opus-4") => Some(ModelPricing {
            input_per_million: 15.0,
            output_per_million: 75.0,
        }),
        id if id.contains("claude-sonnet-4") || id.contains("claude-3-5-sonnet") => {
            Some(ModelPricing {
                input_per_million: 3.0,
                output_per_million: 15.0,
            })
        }
        id if id.contains("claude-haiku") || id.contains("claude-3-5-haiku") => {
            Some(ModelPricing {
                input_per_million: 0.80,
                output_per_million: 4.0,
            })
        }
        _ => None,
    }
}
