//! Prompt construction
//!
//! Every prompt embeds the same structured-operation contract: the model
//! is told to wrap exactly one JSON operation between the delimiters that
//! `cellbot-extract` looks for. The request text picks one of three
//! templates (chart, data creation, general).

use lazy_regex::{lazy_regex, Lazy, Regex};

use cellbot_extract::{OPERATION_END, OPERATION_START};

use crate::context::SheetContext;

static CHART_REQUEST: Lazy<Regex> =
    lazy_regex!(r"(?i)chart|graph|plot|visual|pie|bar|line|radar|histogram|scatter|area");

/// The role and output contract prepended to every conversation
pub fn system_preamble() -> String {
    format!(
        "You are a spreadsheet assistant. Provide clear formulas and operations \
that can be applied directly. For calculations, use formula syntax starting with '='.\n\
\n\
Always include exactly one structured operation in your response:\n\
{start}\n\
{{\n\
  \"type\": \"update_cell | add_formula | create_chart | sort | filter\",\n\
  \"data\": {{ ... }}\n\
}}\n\
{end}\n\
\n\
Operation payloads:\n\
- update_cell: {{\"row\": number, \"col\": number, \"value\": any}}\n\
- add_formula: {{\"row\": number, \"col\": number, \"formula\": string with '=' prefix}}\n\
- create_chart: {{\"chartType\": \"bar|line|pie|radar\", \"title\": string, \
\"data\": [{{\"name\": string, \"value\": number}}, ...]}}\n\
- sort: {{\"column\": letter or number}}\n\
- filter: {{\"column\": letter or number, \"value\": any}}\n\
\n\
Rows and columns are 0-based: A1 is row 0, col 0; B3 is row 2, col 1. \
Supported formulas: SUM, AVERAGE, COUNT, MAX, MIN. \
After the operation block, explain what it does in natural language.",
        start = OPERATION_START,
        end = OPERATION_END,
    )
}

/// True when the request is asking for a visualization
pub fn is_chart_request(request: &str) -> bool {
    CHART_REQUEST.is_match(request)
}

/// True when the request is asking to generate new data
pub fn is_data_creation_request(request: &str) -> bool {
    let lower = request.to_lowercase();
    lower.contains("create") || lower.contains("generate data") || lower.contains("sample data")
}

/// Pick the template that fits the request
pub fn build_prompt(request: &str, ctx: &SheetContext) -> String {
    if is_chart_request(request) {
        chart_prompt(request, ctx)
    } else if is_data_creation_request(request) {
        data_creation_prompt(request, ctx)
    } else {
        general_prompt(request, ctx)
    }
}

/// Chart requests: push the model toward real data points from the sheet
pub fn chart_prompt(request: &str, ctx: &SheetContext) -> String {
    format!(
        "I have a spreadsheet with the following structure:\n{context}\n\
\n\
I want to create a chart: {request}\n\
\n\
Pick the chart type that fits the data: bar for category comparison, line \
for trends, pie for proportions, radar for multi-variable comparison. Use \
the columns that actually contain numeric data and label every point.\n\
\n\
Respond with a create_chart operation whose data array holds at least 5 \
points with real values taken from the sheet, each as \
{{\"name\": string, \"value\": number}}. After the operation block, explain \
what the chart shows.",
        context = ctx.to_json(),
        request = request,
    )
}

/// Data-creation requests: steer writes into empty regions
pub fn data_creation_prompt(request: &str, ctx: &SheetContext) -> String {
    format!(
        "I have a spreadsheet with the following structure:\n{context}\n\
\n\
I want to: {request}\n\
\n\
Place new data so nothing existing is overwritten; these regions are \
empty: {regions}. If headers exist, follow them. Keep new rows consistent \
with the existing data patterns.\n\
\n\
Respond with one update_cell operation per cell, using exact 0-based row \
and column indices, and generate at least 5 rows of realistic values. \
After the operation blocks, explain the data you created.",
        context = ctx.to_json(),
        request = request,
        regions = serde_json::to_string(&ctx.empty_regions).unwrap_or_default(),
    )
}

/// Everything else: calculations, edits, sorting, filtering
pub fn general_prompt(request: &str, ctx: &SheetContext) -> String {
    format!(
        "I have a spreadsheet with the following structure:\n{context}\n\
\n\
I want to: {request}\n\
\n\
Check the existing layout before placing anything: append below the last \
data row when extending a table, put totals at the bottom of their column, \
and use an empty region ({regions}) for brand-new data. Formulas must \
reference the cells that actually hold the data.\n\
\n\
Respond with one structured operation (update_cell, add_formula, sort, or \
filter), using exact 0-based indices and complete values. After the \
operation block, explain the operation in natural language.",
        context = ctx.to_json(),
        request = request,
        regions = serde_json::to_string(&ctx.empty_regions).unwrap_or_default(),
    )
}
