//! Fixed pages served when there is no storefront to render

pub const NOT_FOUND_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Store not found</title>
  <style>body { font-family: system-ui, sans-serif; color: #333; text-align: center; padding: 15vh 24px; }</style>
</head>
<body>
  <h1>Store not found</h1>
  <p>There is no published store at this address.</p>
</body>
</html>
"#;

pub const ERROR_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Something went wrong</title>
  <style>body { font-family: system-ui, sans-serif; color: #333; text-align: center; padding: 15vh 24px; }</style>
</head>
<body>
  <h1>Something went wrong</h1>
  <p>This store could not be displayed right now. Please try again later.</p>
</body>
</html>
"#;
