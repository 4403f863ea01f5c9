use std::path::Path;

use serial_test::serial;

use datafetch::listing_match::table::ListingTable;
use datafetch::listing_match::{ListingMatchFactory, MockWorld, MockWorld_NewContext, TableError};

mod common;

/// An Apache-style directory listing: a header row, a separator row, then one row per file.
static LISTING: &str = r#"
<html><body>
<h1>Index of /pub/data/</h1>
<table>
  <tr><th>Name</th><th>Last modified</th><th>Size</th></tr>
  <tr><td colspan="3"><hr></td></tr>
  <tr><td>by_month.csv</td><td>2026-08-01 10:00</td><td>123</td></tr>
  <tr><td>by_year.csv</td><td>2026-08-01 10:00</td><td>3774993</td></tr>
  <tr><td>readme.txt</td><td>2026-08-01 10:00</td><td>842</td></tr>
</table>
</body></html>
"#;

/// Wires a listing-match [MockWorld] into the [common::PipelineTest] harness. The context guard
/// must stay alive for as long as the pipeline may create worlds.
struct ListingMatchTest {
    _ctx: MockWorld_NewContext,
    test: common::PipelineTest,
}

impl ListingMatchTest {
    fn new(
        manifest: &'static str,
        configure_world: impl Fn(&mut MockWorld) + Send + 'static,
    ) -> Self {
        let ctx = MockWorld::new_context();
        ctx.expect().returning(move |main| {
            let mut world = MockWorld::default();
            world.expect_main().return_const(main);
            configure_world(&mut world);
            world
        });

        let test = common::PipelineTest::new(
            |pipelines| {
                pipelines.register(ListingMatchFactory::<MockWorld>::new());
            },
            &["datafetch", "datafetch.toml"],
            manifest,
        );

        Self { _ctx: ctx, test }
    }

    async fn run(self) -> common::RunResult {
        self.test.run().await
    }
}

#[tokio::test]
#[serial(listing_match)]
async fn finds_and_downloads_the_match() {
    let mut test = ListingMatchTest::new(
        r#"
        [[jobs]]
        name = "ghcn"
        kind = "listing-match"
        url = "https://example.com/pub/data/"
        target = "3774993"
        "#,
        |world| {
            world
                .expect_ensure_dir()
                .once()
                .withf(|dir| dir == Path::new("download"))
                .returning(|_| Ok(()));
            world
                .expect_write_file()
                .once()
                .withf(|path, bytes| {
                    path == Path::new("download/by_year.csv") && bytes == b"csvbody"
                })
                .returning(|_, _| Ok(()));
        },
    );
    test.test
        .expect_fetch("https://example.com/pub/data/", 200, LISTING.as_bytes());
    test.test
        .expect_fetch("https://example.com/pub/data/by_year.csv", 200, b"csvbody");

    test.run()
        .await
        .expect_ok("the target is in the listing")
        .expect_log(
            "[ghcn] beginning job...\n\
             [ghcn] fetching listing https://example.com/pub/data/...\n\
             [ghcn] match found: [\"by_year.csv\", \"2026-08-01 10:00\", \"3774993\"]\n\
             [ghcn] downloading https://example.com/pub/data/by_year.csv...\n\
             [ghcn] saved download/by_year.csv\n\
             [ghcn] job finished\n",
        );
}

#[tokio::test]
#[serial(listing_match)]
async fn first_match_wins() {
    let mut test = ListingMatchTest::new(
        r#"
        [[jobs]]
        name = "ghcn"
        kind = "listing-match"
        url = "https://example.com/pub/data/"
        # both timestamp cells hold this value; the earlier row is taken
        target = "2026-08-01 10:00"
        "#,
        |world| {
            world.expect_ensure_dir().once().returning(|_| Ok(()));
            world
                .expect_write_file()
                .once()
                .withf(|path, _| path == Path::new("download/by_month.csv"))
                .returning(|_, _| Ok(()));
        },
    );
    test.test
        .expect_fetch("https://example.com/pub/data/", 200, LISTING.as_bytes());
    test.test
        .expect_fetch("https://example.com/pub/data/by_month.csv", 200, b"csvbody");

    test.run()
        .await
        .expect_ok("the first matching row is taken")
        .expect_log(
            "[ghcn] beginning job...\n\
             [ghcn] fetching listing https://example.com/pub/data/...\n\
             [ghcn] match found: [\"by_month.csv\", \"2026-08-01 10:00\", \"123\"]\n\
             [ghcn] downloading https://example.com/pub/data/by_month.csv...\n\
             [ghcn] saved download/by_month.csv\n\
             [ghcn] job finished\n",
        );
}

#[tokio::test]
#[serial(listing_match)]
async fn header_rows_are_not_matched() {
    let mut test = ListingMatchTest::new(
        r#"
        [[jobs]]
        name = "ghcn"
        kind = "listing-match"
        url = "https://example.com/pub/data/"
        target = "by_month.csv"
        # skipping three rows hides the by_month row from matching
        header_rows = 3
        "#,
        |_world| {},
    );
    test.test
        .expect_fetch("https://example.com/pub/data/", 200, LISTING.as_bytes());

    test.run()
        .await
        .expect_err("the only occurrence is in a skipped row")
        .expect_log(
            "[ghcn] beginning job...\n\
             [ghcn] fetching listing https://example.com/pub/data/...\n\
             [ghcn] job failed: no row in the listing matches `by_month.csv`\n",
        );
}

#[tokio::test]
#[serial(listing_match)]
async fn missing_target_fails_the_job() {
    let mut test = ListingMatchTest::new(
        r#"
        [[jobs]]
        name = "ghcn"
        kind = "listing-match"
        url = "https://example.com/pub/data/"
        target = "9999999"
        "#,
        |_world| {},
    );
    test.test
        .expect_fetch("https://example.com/pub/data/", 200, LISTING.as_bytes());

    test.run()
        .await
        .expect_err("no row holds the target value")
        .expect_log(
            "[ghcn] beginning job...\n\
             [ghcn] fetching listing https://example.com/pub/data/...\n\
             [ghcn] job failed: no row in the listing matches `9999999`\n",
        );
}

#[tokio::test]
#[serial(listing_match)]
async fn page_without_table_fails_the_job() {
    let mut test = ListingMatchTest::new(
        r#"
        [[jobs]]
        name = "ghcn"
        kind = "listing-match"
        url = "https://example.com/pub/data/"
        target = "3774993"
        "#,
        |_world| {},
    );
    test.test
        .expect_fetch("https://example.com/pub/data/", 200, b"<html><body>nothing</body></html>");

    test.run()
        .await
        .expect_err("the page has no table")
        .expect_log(
            "[ghcn] beginning job...\n\
             [ghcn] fetching listing https://example.com/pub/data/...\n\
             [ghcn] job failed: the listing page does not contain a table\n",
        );
}

#[tokio::test]
#[serial(listing_match)]
async fn listing_fetch_error_fails_the_job() {
    let mut test = ListingMatchTest::new(
        r#"
        [[jobs]]
        name = "ghcn"
        kind = "listing-match"
        url = "https://example.com/pub/data/"
        target = "3774993"
        "#,
        |_world| {},
    );
    test.test
        .expect_fetch("https://example.com/pub/data/", 500, b"oops");

    test.run()
        .await
        .expect_err("the listing page is required")
        .expect_log(
            "[ghcn] beginning job...\n\
             [ghcn] fetching listing https://example.com/pub/data/...\n\
             [ghcn] job failed: server answered 500 for https://example.com/pub/data/\n",
        );
}

#[test]
fn table_parses_headers_and_rows() {
    let table = ListingTable::parse(LISTING, 2).expect("the page has a table");
    assert_eq!(table.headers, ["Name", "Last modified", "Size"]);
    assert_eq!(table.rows.len(), 3);
    assert_eq!(table.rows[0], ["by_month.csv", "2026-08-01 10:00", "123"]);

    let found = table.find("842").expect("the readme row matches");
    assert_eq!(found.file_name, "readme.txt");
    assert_eq!(found.cells, ["readme.txt", "2026-08-01 10:00", "842"]);
}

#[test]
fn table_requires_a_table_element() {
    let error = ListingTable::parse("<p>no files here</p>", 2).expect_err("there is no table");
    assert!(matches!(error, TableError::NoTable), "{error}");
}
