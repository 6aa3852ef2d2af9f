//! HTML layout of the dashboard: filter controls and the three panels.

use crate::charts::ChartSet;
use crate::labels::Season;
use crate::loader::DataExtent;
use crate::render::DashboardViews;

pub const TITLE: &str = "Bike Rental Dashboard";

const STYLE: &str = "\
body{font-family:sans-serif;margin:0;display:flex;color:#222}\
aside{width:260px;padding:1.5rem;background:#f0f4f8;min-height:100vh}\
aside h1{color:darkblue;font-size:1.4rem}\
main{flex:1;padding:1.5rem}\
section{margin-bottom:2.5rem}\
label,fieldset{display:block;margin:.6rem 0}\
.pies{display:flex;gap:1rem;flex-wrap:wrap}\
.note{background:#f7f7f7;border-left:4px solid #003f5c;padding:.5rem 1rem}";

/// Escapes text for use inside HTML element content or attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Builds the full page.
///
/// With an `extent` the sidebar holds a GET form whose controls are bounded
/// by the loaded data; without one (static reports) it only describes the
/// applied selection.
pub fn dashboard_page(views: &DashboardViews, charts: &ChartSet, extent: Option<&DataExtent>) -> String {
    let mut html = format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>{TITLE}</title><style>{STYLE}</style></head><body><aside><h1>{TITLE}</h1>"
    );

    match extent {
        Some(extent) => html.push_str(&filter_form(views, extent)),
        None => html.push_str(&selection_description(views)),
    }

    html.push_str("</aside><main>");

    html.push_str(&format!(
        "<section id=\"trends\"><h2>Daily Bike Rentals</h2>{}<p>{}</p>\
         <h2>Hourly Rental Trend</h2>{}<p>{}</p></section>",
        charts.weekday,
        escape(&views.summaries.weekday),
        charts.hourly,
        escape(&views.summaries.hourly),
    ));

    html.push_str(&format!(
        "<section id=\"users\"><h2>Casual vs Registered Users</h2>\
         <div class=\"pies\">{}{}</div><div class=\"note\">{}</div></section>",
        charts.users_diversity,
        charts.users_volume,
        list(&views.summaries.users),
    ));

    html.push_str(&format!(
        "<section id=\"weather\"><h2>Weather Impact on Rentals</h2>{}\
         <div class=\"note\"><h3>Temperature bands</h3>{}</div>\
         <div class=\"note\"><h3>Summary</h3>{}</div></section>",
        charts.weather,
        list(&views.summaries.temperature_bands),
        list(&views.summaries.weather),
    ));

    html.push_str("</main></body></html>");
    html
}

fn list(lines: &[String]) -> String {
    let items: String = lines
        .iter()
        .map(|line| format!("<li>{}</li>", escape(line)))
        .collect();
    format!("<ul>{items}</ul>")
}

fn filter_form(views: &DashboardViews, extent: &DataExtent) -> String {
    let selection = &views.selection;
    let mut form = String::from("<form method=\"get\" action=\"/\"><h2>Filter</h2>");

    form.push_str(&format!(
        "<label>Start date <input type=\"date\" name=\"start\" value=\"{}\" min=\"{first}\" max=\"{last}\"></label>\
         <label>End date <input type=\"date\" name=\"end\" value=\"{}\" min=\"{first}\" max=\"{last}\"></label>",
        selection.start(),
        selection.end(),
        first = extent.first,
        last = extent.last,
    ));

    // The empty marker keeps an all-unchecked submission from falling back
    // to every season.
    form.push_str("<fieldset><legend>Seasons</legend><input type=\"hidden\" name=\"season\" value=\"\">");
    for season in &extent.seasons {
        let checked = if selection.seasons().contains(season) {
            " checked"
        } else {
            ""
        };
        form.push_str(&format!(
            "<label><input type=\"checkbox\" name=\"season\" value=\"{season}\"{checked}> {season}</label>"
        ));
    }
    form.push_str("</fieldset><button type=\"submit\">Apply</button></form>");

    form
}

fn selection_description(views: &DashboardViews) -> String {
    let selection = &views.selection;
    let seasons: Vec<&str> = selection.seasons().iter().map(|s: &Season| s.name()).collect();

    format!(
        "<h2>Filter</h2><p>{} – {}</p><p>Seasons: {}</p><p>{} hourly / {} daily records</p>",
        selection.start(),
        selection.end(),
        escape(&seasons.join(", ")),
        views.hourly_rows,
        views.daily_rows,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::render_charts;
    use crate::filter::FilterSelection;
    use crate::loader::Datasets;
    use crate::records::RentalRecord;
    use crate::render::render;
    use chrono::NaiveDate;

    fn datasets() -> Datasets {
        let record = |day: u32, hour: Option<u8>, season: u8| RentalRecord {
            date: NaiveDate::from_ymd_opt(2012, 4, day).unwrap(),
            hour,
            season_code: Some(i64::from(season)),
            weekday_code: Some(2),
            temp: 0.45,
            casual: 40,
            registered: 160,
            cnt: 200,
            weekday: None,
            season: None,
            temp_band: None,
        };
        Datasets::new(
            vec![record(2, Some(9), 2), record(3, Some(18), 2)],
            vec![record(2, None, 2), record(3, None, 1)],
        )
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_interactive_page_has_controls() {
        let data = datasets();
        let extent = data.extent().unwrap();
        let selection = FilterSelection::new(
            extent.first,
            extent.last,
            [Season::Summer],
        )
        .unwrap();
        let views = render(&data, &selection);
        let charts = render_charts(&views).unwrap();

        let html = dashboard_page(&views, &charts, Some(&extent));

        assert!(html.contains("name=\"start\" value=\"2012-04-02\""));
        assert!(html.contains("value=\"Summer\" checked"));
        assert!(html.contains("value=\"Spring\">"));
        assert!(html.contains("id=\"weather\""));
        assert!(html.contains("Cold: &lt; 15°C"));
    }

    #[test]
    fn test_static_page_describes_selection() {
        let data = datasets();
        let selection = FilterSelection::full_extent(&data.extent().unwrap());
        let views = render(&data, &selection);
        let charts = render_charts(&views).unwrap();

        let html = dashboard_page(&views, &charts, None);

        assert!(!html.contains("<form"));
        assert!(html.contains("Seasons: Spring, Summer"));
        assert!(html.contains("2 hourly / 2 daily records"));
    }
}
