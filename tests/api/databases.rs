//! tests/api/databases.rs
use crate::helpers::spawn_app;

#[tokio::test]
async fn the_database_index_links_to_the_mortality_viewer() {
    let app = spawn_app().await;

    let html_page = app.api_get_html("/databases").await;

    assert!(html_page.contains(r#"<a href="/databases/mortality">Mortality DB</a>"#));
}

#[tokio::test]
async fn the_mortality_viewer_renders_rows_without_authentication() {
    let app = spawn_app().await;

    let response = app.get_database("mortality").await;
    assert!(response.status().is_success());

    let html_page = response.text().await.unwrap();
    assert!(html_page.contains("<th>Country</th>"));
    assert!(html_page.contains("<th>Mortality rate (all ages)</th>"));
    assert!(html_page.contains("<td>Norway</td>"));
    assert!(html_page.contains("<td>Sweden</td>"));
}

#[tokio::test]
async fn an_unknown_database_name_is_a_404() {
    let app = spawn_app().await;

    let response = app.get_database("migration").await;

    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(response.text().await.unwrap(), "No such database.");
}
