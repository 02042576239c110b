//! src/routes/pages.rs
use actix_web::{HttpResponse, http::header::ContentType};

pub async fn about() -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta http-equiv="content-type" content="text/html; charset=utf-8">
<title>About</title>
</head>
<body>
<h1>About</h1>
<p>This site hosts a small epidemiological dataset of weekly mortality
statistics, split by country, sex and age band.</p>
<p><a href="/">Back</a></p>
</body>
</html>"#,
    )
}

pub async fn contact() -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta http-equiv="content-type" content="text/html; charset=utf-8">
<title>Contact</title>
</head>
<body>
<h1>Contact</h1>
<p>Questions about the data? Write to the site owner.</p>
<p><a href="/">Back</a></p>
</body>
</html>"#,
    )
}
