// src/dashboard/page.rs

use crate::constants::BANNER_COLOR_HEX;
use crate::data_analysis::selection::{OutlierMode, TypeSelection};
use crate::signal_names::SIGNAL_TYPES;

/// Escapes text for inclusion in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// URL of the rendered figure for a given control state.
pub fn plot_url(selection: &TypeSelection, outlier_mode: OutlierMode) -> String {
    format!(
        "/plot.svg?types={}&outliers={}",
        selection.to_query_value(),
        outlier_mode
    )
}

fn type_checkboxes(selection: &TypeSelection) -> String {
    SIGNAL_TYPES
        .iter()
        .map(|t| {
            format!(
                r#"<label><input type="checkbox" name="types" value="{code}"{checked}> {label}</label>"#,
                code = t.code(),
                label = t.label(),
                checked = if selection.contains(*t) { " checked" } else { "" },
            )
        })
        .collect::<Vec<_>>()
        .join("\n        ")
}

fn outlier_radios(outlier_mode: OutlierMode) -> String {
    [OutlierMode::Include, OutlierMode::Remove]
        .iter()
        .map(|mode| {
            format!(
                r#"<label><input type="radio" name="outliers" value="{value}"{checked}> {value}</label>"#,
                value = mode.as_str(),
                checked = if *mode == outlier_mode { " checked" } else { "" },
            )
        })
        .collect::<Vec<_>>()
        .join("\n        ")
}

// Re-requests the figure whenever a control changes. `order` starts from the
// server-side selection carried in `data-types` and then follows click order,
// so subplots keep the order in which types were chosen.
const CONTROL_SCRIPT: &str = r#"
  const form = document.getElementById('controls');
  const plot = document.getElementById('value_plots');
  let order = form.dataset.types ? form.dataset.types.split(',') : [];
  form.addEventListener('change', (event) => {
    const el = event.target;
    if (el.name === 'types') {
      order = order.filter(v => v !== el.value);
      if (el.checked) { order.push(el.value); }
    }
    const outliers = form.querySelector('input[name=outliers]:checked').value;
    const query = 'types=' + order.join(',') + '&outliers=' + outliers;
    plot.src = '/plot.svg?' + query;
    history.replaceState(null, '', '/?' + query);
  });
"#;

/// Full dashboard page for the given control state.
pub fn render_dashboard_page(
    source_name: &str,
    selection: &TypeSelection,
    outlier_mode: OutlierMode,
) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Three Phase Sensor</title>
  <style>
    body {{ font-family: sans-serif; margin: 0; }}
    .banner {{ background-color: {banner}; color: white; padding: 12px 20px; font-size: 20px; }}
    h3 {{ text-align: center; }}
    .plot-layout {{ display: flex; gap: 24px; padding: 0 20px; }}
    .selectors {{ flex: 0 0 220px; }}
    .selectors label {{ display: block; margin: 4px 0; }}
    .outlier-label {{ margin-bottom: 1px; margin-top: 10px; }}
    .radio label {{ display: inline-block; margin-right: 12px; }}
    .graph {{ flex: 1; }}
    .graph img {{ width: 100%; }}
  </style>
</head>
<body>
  <div class="banner">{source}</div>
  <h3>Three Phase Sensor</h3>
  <div class="plot-layout">
    <form id="controls" class="selectors" data-types="{types}">
        {checkboxes}
      <p class="outlier-label">filter outliers:</p>
      <div class="radio">
        {radios}
      </div>
    </form>
    <div class="graph">
      <img id="value_plots" src="{plot_src}" alt="three phase sensor plots">
    </div>
  </div>
  <script>{script}</script>
</body>
</html>
"#,
        banner = BANNER_COLOR_HEX,
        source = escape_html(source_name),
        types = escape_html(&selection.to_query_value()),
        checkboxes = type_checkboxes(selection),
        radios = outlier_radios(outlier_mode),
        plot_src = escape_html(&plot_url(selection, outlier_mode)),
        script = CONTROL_SCRIPT,
    )
}
