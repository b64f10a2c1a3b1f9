//! Integration tests for the generate workflow

use std::fs;

use mysql_add_schema::{generate, GenerateOptions, SchemaError};
use pretty_assertions::assert_eq;

use crate::common::{output_blocks, read_output, TestContext};

fn schema_error(err: &anyhow::Error) -> &SchemaError {
    err.downcast_ref::<SchemaError>()
        .unwrap_or_else(|| panic!("Expected SchemaError, got: {:?}", err))
}

// ============================================================================
// Successful Generation Tests
// ============================================================================

#[test]
fn test_generate_cross_product_order() {
    let ctx = TestContext::empty();
    ctx.write_file("input.sql", "INSERT INTO t VALUES(1); UPDATE t SET x=1;");

    let (report, text) = ctx.generate_successfully(ctx.options(&["a", "b"]));

    assert_eq!(report.statement_count, 2);
    assert_eq!(
        text,
        "INSERT INTO a.t VALUES(1);\n\n\
         UPDATE a.t SET x=1;\n\n\
         INSERT INTO b.t VALUES(1);\n\n\
         UPDATE b.t SET x=1;\n\n"
    );
}

#[test]
fn test_generate_default_output_name() {
    let ctx = TestContext::empty();
    ctx.write_file("input.sql", "SELECT 1 FROM t;");

    let (report, _) = ctx.generate_successfully(ctx.options(&["a"]));

    assert_eq!(report.output_path, ctx.work_dir.join("input_generated.sql"));
    assert!(report.output_path.exists());
}

#[test]
fn test_generate_input_without_sql_extension() {
    let ctx = TestContext::empty();
    let input = ctx.write_file("dump.txt", "SELECT 1 FROM t;");

    let mut options = ctx.options(&["a"]);
    options.input = Some(input);
    let (report, text) = ctx.generate_successfully(options);

    assert_eq!(report.output_path, ctx.work_dir.join("dump_generated.sql"));
    assert_eq!(text, "SELECT 1 FROM a.t;\n\n");
}

#[test]
fn test_generate_explicit_output_path() {
    let ctx = TestContext::empty();
    ctx.write_file("input.sql", "DROP TABLE t;");

    let mut options = ctx.options(&["a"]);
    options.output = Some(ctx.work_dir.join("custom.sql"));
    let (report, text) = ctx.generate_successfully(options);

    assert_eq!(report.output_path, ctx.work_dir.join("custom.sql"));
    assert_eq!(text, "DROP TABLE a.t;\n\n");
}

#[test]
fn test_generate_mixed_script_fixture() {
    let ctx = TestContext::with_fixture("mixed_script");

    let mut options = ctx.options(&[]);
    options.all_schemas = true;
    let (report, text) = ctx.generate_successfully(options);

    let schemas: Vec<String> = report.schemas.iter().map(|s| s.to_string()).collect();
    assert_eq!(schemas, vec!["tenant_a", "tenant_b"]);
    assert_eq!(report.statement_count, 5);

    let blocks = output_blocks(&text);
    assert_eq!(blocks.len(), 10);

    assert!(blocks[0].starts_with("-- orders module\nCREATE TABLE tenant_a.orders ("));
    assert!(blocks[0].contains("DEFAULT 'n/a; pending'"));
    assert!(blocks[0].contains("ON UPDATE CURRENT_TIMESTAMP"));
    assert_eq!(
        blocks[1],
        "INSERT INTO tenant_a.orders (id, note) VALUES (1, 'first;order')"
    );
    assert_eq!(
        blocks[2],
        "UPDATE tenant_a.orders SET note = \"second;pass\" WHERE id = 1"
    );
    assert_eq!(
        blocks[3],
        "SELECT o.id FROM tenant_a.orders o JOIN audit.log l ON l.order_id = o.id"
    );
    assert_eq!(blocks[4], "DROP VIEW tenant_a.order_summary");
    assert_eq!(blocks[9], "DROP VIEW tenant_b.order_summary");
}

#[test]
fn test_generate_comment_clauses_fixture() {
    let ctx = TestContext::with_fixture("comment_clauses");

    let mut options = ctx.options(&[]);
    options.all_schemas = true;
    let (report, text) = ctx.generate_successfully(options);

    assert_eq!(report.statement_count, 2);
    let blocks = output_blocks(&text);
    assert_eq!(blocks.len(), 2);
    assert!(blocks[0].starts_with("CREATE TABLE app.`users` ("));
    assert!(blocks[0].contains("COMMENT 'primary key; auto'"));
    assert!(blocks[0].ends_with("COMMENT = 'user accounts'"));
    assert_eq!(
        blocks[1],
        "ALTER TABLE app.users MODIFY COLUMN name VARCHAR(64) NULL COMMENT 'test-comment'"
    );
}

#[test]
fn test_generate_windows_1252_input() {
    let ctx = TestContext::empty();
    fs::write(ctx.input_path(), b"INSERT INTO t VALUES ('caf\xe9');").unwrap();

    let (_, text) = ctx.generate_successfully(ctx.options(&["a"]));
    assert_eq!(text, "INSERT INTO a.t VALUES ('café');\n\n");
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn test_generate_without_input() {
    let ctx = TestContext::empty();
    let mut options = ctx.options(&["a"]);
    options.input = None;

    let err = generate(options).unwrap_err();
    assert!(matches!(schema_error(&err), SchemaError::NoInputSelected));
}

#[test]
fn test_generate_without_schema() {
    let ctx = TestContext::with_fixture("mixed_script");

    let err = generate(ctx.options(&[])).unwrap_err();
    assert!(matches!(schema_error(&err), SchemaError::NoSchemaSelected));
    assert!(!ctx.work_dir.join("input_generated.sql").exists());
}

#[test]
fn test_generate_all_with_empty_schema_list() {
    let ctx = TestContext::empty();
    ctx.write_file("input.sql", "SELECT 1;");

    let mut options = ctx.options(&[]);
    options.all_schemas = true;
    let err = generate(options).unwrap_err();
    assert!(matches!(schema_error(&err), SchemaError::NoSchemaSelected));
}

#[test]
fn test_generate_missing_input_file() {
    let ctx = TestContext::empty();

    let err = generate(ctx.options(&["a"])).unwrap_err();
    assert!(matches!(
        schema_error(&err),
        SchemaError::InputUnreadable { .. }
    ));
}

#[test]
fn test_generate_unwritable_output() {
    let ctx = TestContext::empty();
    ctx.write_file("input.sql", "SELECT 1;");

    let output = ctx.work_dir.join("no_such_dir").join("out.sql");
    let mut options = ctx.options(&["a"]);
    options.output = Some(output.clone());

    let err = generate(options).unwrap_err();
    assert!(matches!(
        schema_error(&err),
        SchemaError::OutputUnwritable { .. }
    ));
    assert!(!output.exists());
}

#[test]
fn test_generate_retry_after_fixing_selection() {
    let ctx = TestContext::with_fixture("mixed_script");

    assert!(generate(ctx.options(&[])).is_err());

    let (report, _) = ctx.generate_successfully(ctx.options(&["tenant_b"]));
    let text = read_output(&report.output_path);
    assert!(text.starts_with("-- orders module\nCREATE TABLE tenant_b.orders ("));
}

#[test]
fn test_generate_unknown_encoding_label() {
    let ctx = TestContext::empty();
    ctx.write_file("input.sql", "SELECT 1;");

    let options = GenerateOptions {
        fallback_encoding: Some("klingon".to_string()),
        ..ctx.options(&["a"])
    };
    let err = generate(options).unwrap_err();
    assert!(matches!(
        schema_error(&err),
        SchemaError::UnknownEncoding { .. }
    ));
}
