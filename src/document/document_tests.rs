//! Tests for parsing, mutating and writing whole documents

use super::*;
use crate::tree;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const JOB_CONFIG: &str = r#"<?xml version='1.1' encoding='UTF-8'?>
<project>
  <description>nightly</description>
  <keepDependencies>false</keepDependencies>
  <properties>
    <hudson.model.ParametersDefinitionProperty>
      <parameterDefinitions>
        <hudson.model.StringParameterDefinition>
          <name>BRANCH</name>
          <defaultValue>main</defaultValue>
          <trim>false</trim>
        </hudson.model.StringParameterDefinition>
      </parameterDefinitions>
    </hudson.model.ParametersDefinitionProperty>
  </properties>
  <scm class="hudson.scm.NullSCM"/>
  <builders>
    <hudson.tasks.Shell>
      <command>make test</command>
    </hudson.tasks.Shell>
    <hudson.tasks.Shell>
      <command>make dist</command>
    </hudson.tasks.Shell>
  </builders>
  <publishers/>
</project>"#;

#[test]
fn test_round_trip_preserves_structure() {
    let doc = Document::parse(JOB_CONFIG).unwrap();
    let reparsed = Document::parse(&doc.unparse().unwrap()).unwrap();
    assert_eq!(reparsed, doc);
}

const MIXED_BUILDERS: &str = r"<project>
  <builders>
    <hudson.tasks.Shell>
      <command>a</command>
    </hudson.tasks.Shell>
    <hudson.tasks.BatchFile>
      <command>b</command>
    </hudson.tasks.BatchFile>
    <hudson.tasks.Shell>
      <command>c</command>
    </hudson.tasks.Shell>
  </builders>
</project>";

/// Element names below `node` in document order, depth first
fn element_names(name: &str, node: &Node, out: &mut Vec<String>) {
    out.push(name.to_string());
    match node {
        Node::Tree(tree) => {
            for (key, child) in tree.ordered_children() {
                element_names(key, child, out);
            }
        }
        Node::List(items) => {
            out.pop();
            for item in items {
                element_names(name, item, out);
            }
        }
        Node::Null | Node::Scalar(_) => {}
    }
}

fn names(doc: &Document) -> Vec<String> {
    let mut out = Vec::new();
    element_names(doc.root_name(), doc.root(), &mut out);
    out
}

#[test]
fn test_round_trip_is_stable() {
    let doc = Document::parse(JOB_CONFIG).unwrap();
    let once = doc.unparse().unwrap();
    let reparsed = Document::parse(&once).unwrap();

    assert_eq!(names(&reparsed), names(&doc));
    assert_eq!(reparsed.unparse().unwrap(), once);
}

#[test]
fn test_round_trip_keeps_interleaved_build_steps() {
    let doc = Document::parse(MIXED_BUILDERS).unwrap();
    let xml = doc.unparse().unwrap();

    let a = xml.find("<command>a</command>").unwrap();
    let b = xml.find("<command>b</command>").unwrap();
    let c = xml.find("<command>c</command>").unwrap();
    assert!(a < b && b < c, "build steps reordered:\n{xml}");

    let reparsed = Document::parse(&xml).unwrap();
    assert_eq!(reparsed, doc);
    assert_eq!(
        xml,
        format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{MIXED_BUILDERS}")
    );
}

#[test]
fn test_appended_step_follows_interleaved_steps() {
    let mut doc = Document::parse(MIXED_BUILDERS).unwrap();
    doc.root_element()
        .unwrap()
        .into_child("builders")
        .unwrap()
        .append("hudson.tasks.Shell", tree! { "command" => "d" });

    let xml = doc.unparse().unwrap();
    let positions: Vec<_> = ["a", "b", "c", "d"]
        .iter()
        .map(|c| xml.find(&format!("<command>{c}</command>")).unwrap())
        .collect();
    assert!(positions.is_sorted(), "build steps reordered:\n{xml}");
}

#[test]
fn test_round_trip_preserves_order() {
    let doc = Document::parse(JOB_CONFIG).unwrap();
    let keys: Vec<_> = doc.root().as_tree().unwrap().keys().collect();
    assert_eq!(
        keys,
        vec![
            "description",
            "keepDependencies",
            "properties",
            "scm",
            "builders",
            "publishers"
        ]
    );
}

#[test]
fn test_round_trip_keeps_declaration_version() {
    let doc = Document::parse(JOB_CONFIG).unwrap();
    assert!(
        doc.unparse()
            .unwrap()
            .starts_with(r#"<?xml version="1.1" encoding="UTF-8"?>"#)
    );
}

#[test]
fn test_write_then_read_through_path() {
    let mut doc = Document::parse(JOB_CONFIG).unwrap();
    let mut root = doc.root_element().unwrap();
    root.set_path("publishers/hudson.tasks.ArtifactArchiver/artifacts", "*.log")
        .unwrap();

    let field = root
        .get_path("publishers/hudson.tasks.ArtifactArchiver/artifacts")
        .unwrap();
    assert_eq!(field.as_str(), Some("*.log"));
}

#[test]
fn test_write_tree_then_read_returns_same_tree() {
    let mut doc = Document::parse(JOB_CONFIG).unwrap();
    let mut root = doc.root_element().unwrap();
    let archiver = tree! { "artifacts" => "*.log", "fingerprint" => true };
    root.set_path("publishers/hudson.tasks.ArtifactArchiver", archiver.clone())
        .unwrap();

    let read = root
        .get_path("publishers/hudson.tasks.ArtifactArchiver")
        .unwrap()
        .into_element()
        .unwrap();
    assert_eq!(read.tree(), &archiver);
}

#[test]
fn test_successive_views_share_storage() {
    let mut doc = Document::parse(JOB_CONFIG).unwrap();
    let mut root = doc.root_element().unwrap();

    root.child("properties")
        .unwrap()
        .child("hudson.model.ParametersDefinitionProperty")
        .unwrap()
        .child("parameterDefinitions")
        .unwrap()
        .child("hudson.model.StringParameterDefinition")
        .unwrap()
        .set("defaultValue", "develop");

    let mut view = root
        .reborrow()
        .get_path("properties/hudson.model.ParametersDefinitionProperty/parameterDefinitions")
        .unwrap()
        .into_element()
        .unwrap();
    let parameter = view.child("hudson.model.StringParameterDefinition").unwrap();
    assert_eq!(
        parameter.tree().get("defaultValue").and_then(Node::as_str),
        Some("develop")
    );

    let xml = doc.unparse().unwrap();
    assert!(xml.contains("<defaultValue>develop</defaultValue>"));
}

#[test]
fn test_list_read_returns_raw_items() {
    let mut doc = Document::parse(JOB_CONFIG).unwrap();
    let builders = doc
        .root_element()
        .unwrap()
        .get_path("builders/hudson.tasks.Shell")
        .unwrap()
        .into_value()
        .unwrap();

    let items = builders.as_list_mut().unwrap();
    assert_eq!(items.len(), 2);
    if let Some(Node::Tree(last)) = items.last_mut() {
        last.insert("command", "make release");
    }
    assert!(
        doc.unparse()
            .unwrap()
            .contains("<command>make release</command>")
    );
}

#[test]
fn test_parse_from_str() {
    let doc: Document = "<project/>".parse().unwrap();
    assert_eq!(doc.root_name(), "project");
}

#[test]
fn test_root_element_rejects_text_root() {
    let mut doc = Document::parse("<project>text</project>").unwrap();
    assert!(matches!(
        doc.root_element(),
        Err(DocumentError::NotAnElement { .. })
    ));
}

proptest! {
    #[test]
    fn test_text_survives_round_trip(text in "[a-zA-Z0-9 <>&\"'$*./_-]{1,40}") {
        let text = text.trim().to_string();
        prop_assume!(!text.is_empty());

        let mut doc = Document::parse("<project/>").unwrap();
        doc.root_element().unwrap().set("command", text.as_str());
        let reparsed = Document::parse(&doc.unparse().unwrap()).unwrap();

        prop_assert_eq!(
            reparsed.root().as_tree().and_then(|t| t.get("command")).and_then(Node::as_str),
            Some(text.as_str())
        );
    }
}
