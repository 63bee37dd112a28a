//! Plain-text rendering of view outputs for the CLI.

pub mod format;

pub use format::*;

use crate::views::{ViewOutput, ViewRequest};

/// Render a view output as a text block. The request supplies calculator inputs.
pub fn format_view(request: &ViewRequest, output: &ViewOutput) -> String {
    match (request, output) {
        (ViewRequest::Calculator(input), ViewOutput::Calculator(quote)) => format_quote(input, quote),
        (_, ViewOutput::Calculator(quote)) => format_quote(&Default::default(), quote),
        (_, ViewOutput::Historical(view)) => format_historical(view),
        (_, ViewOutput::Regional(view)) => format_regional(view),
        (_, ViewOutput::Insights(view)) => format_insights(view),
    }
}
