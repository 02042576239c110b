//! src/routes/databases.rs
use crate::datasets::{MortalityRow, TabularSource};
use crate::utils::e500;
use actix_web::{HttpResponse, http::header::ContentType, web};
use std::fmt::Write;

/// The original dataset ships with twenty preview rows per page load.
const DATASET_ROW_LIMIT: i64 = 20;

const MORTALITY_HEADERS: [&str; 20] = [
    "id",
    "Country",
    "Year",
    "Week",
    "Sex",
    "Weekly deaths (0-14)",
    "Weekly deaths (15-64)",
    "Weekly deaths (65-74)",
    "Weekly deaths (75-84)",
    "Weekly deaths (85+)",
    "Total deaths",
    "Mortality rate (0-14)",
    "Mortality rate (15-64)",
    "Mortality rate (65-74)",
    "Mortality rate (75-84)",
    "Mortality rate (85+)",
    "Mortality rate (all ages)",
    "Split by age",
    "Split by sex",
    "Uses forecasts",
];

pub async fn databases() -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta http-equiv="content-type" content="text/html; charset=utf-8">
<title>Databases</title>
</head>
<body>
<h1>Databases</h1>
<ul>
<li><a href="/databases/mortality">Mortality DB</a></li>
</ul>
<p><a href="/">Back</a></p>
</body>
</html>"#,
    )
}

#[tracing::instrument(name = "Show a database", skip(datasets))]
pub async fn show_database(
    name: web::Path<String>,
    datasets: web::Data<dyn TabularSource>,
) -> Result<HttpResponse, actix_web::Error> {
    if name.as_str() != "mortality" {
        return Ok(HttpResponse::NotFound()
            .content_type(ContentType::html())
            .body("No such database."));
    }
    let rows = datasets
        .fetch_mortality(DATASET_ROW_LIMIT)
        .await
        .map_err(e500)?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(render_mortality_table(&rows)))
}

fn render_mortality_table(rows: &[MortalityRow]) -> String {
    let mut table = String::new();
    writeln!(table, "<table border=\"1\">").unwrap();
    write!(table, "<tr>").unwrap();
    for header in MORTALITY_HEADERS {
        write!(table, "<th>{}</th>", header).unwrap();
    }
    writeln!(table, "</tr>").unwrap();
    for row in rows {
        write!(table, "<tr>").unwrap();
        write!(
            table,
            "<td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>",
            row.id, row.country, row.year, row.week, row.sex
        )
        .unwrap();
        for value in [row.d14, row.d64, row.d74, row.d84, row.dp, row.dall] {
            write!(table, "<td>{}</td>", value).unwrap();
        }
        for value in [row.r14, row.r64, row.r74, row.r84, row.rp, row.rall] {
            write!(table, "<td>{}</td>", value).unwrap();
        }
        write!(
            table,
            "<td>{}</td><td>{}</td><td>{}</td>",
            row.split, row.splitsex, row.forecast
        )
        .unwrap();
        writeln!(table, "</tr>").unwrap();
    }
    writeln!(table, "</table>").unwrap();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta http-equiv="content-type" content="text/html; charset=utf-8">
<title>Mortality DB</title>
</head>
<body>
<h1>Mortality DB</h1>
{table}
<p><a href="/databases">Back</a></p>
</body>
</html>"#
    )
}
