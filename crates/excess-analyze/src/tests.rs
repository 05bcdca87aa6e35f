use super::*;
use crate::testing::Fixture;
use excess_core::ast::{Expression, Statement};
use excess_core::TypeId;
use std::fs;

fn analyze(fx: &Fixture, statements: Vec<Statement>, options: RuleOptions) -> IssueCollection {
    let program = Program::new(statements);
    Analyzer::new(options).analyze_program(Path::new("app.tsx"), &program, &fx.table)
}

/// `{ name: string }` and a `{ name, age }` value
fn user_and_jiro(fx: &mut Fixture) -> (TypeId, TypeId) {
    let string = fx.string();
    let number = fx.number();
    let user = fx.literal(vec![("name", string)]);
    let jiro = fx.literal(vec![("name", string), ("age", number)]);
    (user, jiro)
}

fn assignment(fx: &mut Fixture) -> Vec<Statement> {
    let (user, jiro) = user_and_jiro(fx);
    let init = fx.expr(jiro);
    vec![fx.declare("sampleUser", Some(user), Some(init))]
}

#[test]
fn test_analyzer_creation() {
    let analyzer = Analyzer::with_defaults();
    assert!(analyzer.options().check_jsx);
    assert!(!analyzer.is_excluded(Path::new("src/a.json")));
}

#[test]
fn test_direct_assignment_reports_excess_property() {
    let mut fx = Fixture::new();
    let statements = assignment(&mut fx);

    let issues = analyze(&fx, statements, RuleOptions::default());
    assert_eq!(issues.len(), 1);
    let issue = &issues.issues()[0];
    assert_eq!(issue.data.property_path, "age");
    assert_eq!(issue.kind, FindingKind::ExcessPropertyOnValue);
    assert_eq!(issue.file, PathBuf::from("app.tsx"));
}

#[test]
fn test_array_of_matching_literals_passes() {
    let mut fx = Fixture::new();
    let string = fx.string();
    let taro_name = fx.table.add(excess_core::TypeKind::StringLiteral {
        value: "taro".into(),
    });
    let user = fx.literal(vec![("name", string)]);
    let users = fx.table.array(user);
    let taro = fx.literal(vec![("name", taro_name)]);
    let value = fx.table.tuple(vec![taro]);
    let init = fx.expr(value);
    let decl = fx.declare("users", Some(users), Some(init));

    assert!(analyze(&fx, vec![decl], RuleOptions::default()).is_empty());
}

#[test]
fn test_function_return_reports_return_finding() {
    let mut fx = Fixture::new();
    let string = fx.string();
    let number = fx.number();
    let expected = fx.literal(vec![("id", number)]);
    let returned = fx.literal(vec![("id", number), ("name", string)]);
    let fn_type = fx.table.function(vec![], expected);
    let value = fx.expr(returned);
    let ret = fx.ret(Some(value));
    let lambda = fx.function(None, fn_type, vec![ret]);
    let decl = fx.declare("getId", Some(fn_type), Some(Expression::Function(lambda)));

    let issues = analyze(&fx, vec![decl], RuleOptions::default());
    assert_eq!(issues.len(), 1);
    let issue = &issues.issues()[0];
    assert_eq!(issue.kind, FindingKind::ExcessPropertyOnReturn);
    assert_eq!(issue.data.property_path, "name");
}

#[test]
fn test_index_signature_value_reports_path() {
    let mut fx = Fixture::new();
    let (user, jiro) = user_and_jiro(&mut fx);
    let string = fx.string();
    let record = fx.table.record(string, user);
    let value = fx.literal(vec![("1", jiro)]);
    let init = fx.expr(value);
    let decl = fx.declare("users", Some(record), Some(init));

    let issues = analyze(&fx, vec![decl], RuleOptions::default());
    assert_eq!(issues.len(), 1);
    assert_eq!(issues.issues()[0].data.property_path, "1.age");
}

#[test]
fn test_jsx_spread_reports_unless_disabled() {
    let mut fx = Fixture::new();
    let (props, spread_value) = user_and_jiro(&mut fx);
    let element_type = fx.any();
    let component = fx.table.function(vec![props], element_type);
    let spread = fx.spread(spread_value);
    let element = fx.jsx("Profile", component, vec![spread]);
    let stmt = fx.expr_stmt(element);

    let issues = analyze(&fx, vec![stmt.clone()], RuleOptions::default());
    assert_eq!(issues.len(), 1);
    assert_eq!(issues.issues()[0].check_id, "excess-property.jsx");
    assert_eq!(issues.issues()[0].data.property_path, "age");

    let options = RuleOptions {
        check_jsx: false,
        ..RuleOptions::default()
    };
    assert!(analyze(&fx, vec![stmt], options).is_empty());
}

#[test]
fn test_skip_properties_suppress_assignment() {
    let mut fx = Fixture::new();
    let statements = assignment(&mut fx);
    let options = RuleOptions {
        skip_properties: vec!["age".into()],
        ..RuleOptions::default()
    };
    assert!(analyze(&fx, statements, options).is_empty());
}

#[test]
fn test_block_function_initializer_not_double_reported() {
    let mut fx = Fixture::new();
    let (user, jiro) = user_and_jiro(&mut fx);
    let fn_type = fx.table.function(vec![], user);
    let wider_type = fx.table.function(vec![], jiro);
    let value = fx.expr(jiro);
    let ret = fx.ret(Some(value));
    let lambda = fx.function(None, wider_type, vec![ret]);
    let decl = fx.declare("make", Some(fn_type), Some(Expression::Function(lambda)));

    let issues = analyze(&fx, vec![decl], RuleOptions::default());
    assert_eq!(issues.len(), 1);
    assert_eq!(issues.issues()[0].check_id, "excess-property.return");
}

#[test]
fn test_severity_applies_to_findings() {
    let mut fx = Fixture::new();
    let statements = assignment(&mut fx);
    let program = Program::new(statements);
    let analyzer = Analyzer::with_defaults().with_severity(Severity::Warning);
    let issues = analyzer.analyze_program(Path::new("a.ts"), &program, &fx.table);
    assert_eq!(issues.warning_count(), 1);
    assert_eq!(issues.error_count(), 0);
}

fn write_snapshot(path: &Path, unit_path: &str) {
    let mut fx = Fixture::new();
    let statements = assignment(&mut fx);
    let snapshot = Snapshot {
        units: vec![SourceUnit::new(unit_path, Program::new(statements), fx.table)],
    };
    fs::write(path, snapshot.to_json_string().unwrap()).unwrap();
}

#[test]
fn test_analyze_paths_walks_directories() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(&dir.path().join("a.json"), "src/a.ts");
    fs::create_dir(dir.path().join("nested")).unwrap();
    write_snapshot(&dir.path().join("nested/b.json"), "src/b.ts");
    fs::write(dir.path().join("notes.txt"), "not a snapshot").unwrap();

    let report = Analyzer::with_defaults()
        .analyze_paths(&[dir.path()])
        .unwrap();

    assert_eq!(report.files, 2);
    assert!(report.skipped.is_empty());
    let files: Vec<_> = report.issues.issues().iter().map(|i| i.file.clone()).collect();
    assert_eq!(files, vec![PathBuf::from("src/a.ts"), PathBuf::from("src/b.ts")]);
}

#[test]
fn test_unreadable_snapshot_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(&dir.path().join("good.json"), "src/good.ts");
    fs::write(dir.path().join("bad.json"), "{ not json").unwrap();

    let report = Analyzer::with_defaults()
        .analyze_paths(&[dir.path()])
        .unwrap();

    assert_eq!(report.files, 1);
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].path.ends_with("bad.json"));
    assert!(matches!(report.skipped[0].error, AnalyzeError::Snapshot(_)));
}

#[test]
fn test_exclude_patterns() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(&dir.path().join("a.json"), "src/generated/a.ts");
    write_snapshot(&dir.path().join("b.json"), "src/b.ts");

    let analyzer = Analyzer::with_defaults()
        .with_exclude_patterns(&["src/generated/**".to_string(), "**/b.json".to_string()])
        .unwrap();
    let report = analyzer.analyze_paths(&[dir.path()]).unwrap();

    assert_eq!(report.files, 1);
    assert!(report.issues.is_empty());
}

#[test]
fn test_invalid_exclude_pattern() {
    let result = Analyzer::with_defaults().with_exclude_patterns(&["[".to_string()]);
    assert!(matches!(result, Err(AnalyzeError::InvalidPattern(..))));
}

#[test]
fn test_missing_path_and_no_paths() {
    let analyzer = Analyzer::with_defaults();
    assert!(matches!(
        analyzer.analyze_paths(&[]),
        Err(AnalyzeError::NoPaths)
    ));
    assert!(matches!(
        analyzer.analyze_paths(&[Path::new("/definitely/not/here")]),
        Err(AnalyzeError::PathNotFound(_))
    ));
}

#[test]
fn test_units_analyzed_independently() {
    let mut units = Vec::new();
    for name in ["src/c.ts", "src/a.ts", "src/b.ts"] {
        let mut fx = Fixture::new();
        let statements = assignment(&mut fx);
        units.push(SourceUnit::new(name, Program::new(statements), fx.table));
    }
    let snapshot = Snapshot { units };

    let issues = Analyzer::with_defaults().analyze_snapshot(&snapshot);
    let files: Vec<_> = issues.issues().iter().map(|i| i.file.clone()).collect();
    assert_eq!(
        files,
        vec![
            PathBuf::from("src/a.ts"),
            PathBuf::from("src/b.ts"),
            PathBuf::from("src/c.ts")
        ]
    );
}
