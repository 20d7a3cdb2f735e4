use jack_emit::{Emitter, JsonEmitter, OutputFormat, XmlEmitter};
use jack_parser::{parse, tokenize, Parser};
use serde_json::Value;

const SOURCE: &str = r#"
class Main {
    function void main() {
        var int a, b;
        let a = 1;
        let b = a < 2 & ~(a > 3);
        do Output.printString("x & y");
        return;
    }
}
"#;

#[test]
fn test_xml_empty_class() {
    let class = parse("class Main { }").unwrap();
    let xml = XmlEmitter.emit_tree(&class).unwrap();
    assert_eq!(
        xml,
        "<class>\n  <keyword> class </keyword>\n  <identifier> Main </identifier>\n  <symbol> { </symbol>\n  <symbol> } </symbol>\n</class>\n"
    );
}

#[test]
fn test_xml_escapes_and_empty_nodes() {
    let class = parse(SOURCE).unwrap();
    let xml = XmlEmitter.emit_tree(&class).unwrap();

    assert!(xml.contains("    <parameterList>\n    </parameterList>\n"));
    assert!(xml.contains("<symbol> &lt; </symbol>"));
    assert!(xml.contains("<symbol> &gt; </symbol>"));
    assert!(xml.contains("<symbol> &amp; </symbol>"));
    assert!(xml.contains("<stringConstant> x &amp; y </stringConstant>"));
    assert!(xml.contains("<integerConstant> 2 </integerConstant>"));
}

#[test]
fn test_xml_nesting_of_let_statement() {
    let mut parser = Parser::new("let x = 1;").unwrap();
    let stmt = parser.parse_let_statement().unwrap();
    let xml = XmlEmitter.emit_tree(&stmt).unwrap();
    let expected = "\
<letStatement>
  <keyword> let </keyword>
  <identifier> x </identifier>
  <symbol> = </symbol>
  <expression>
    <term>
      <integerConstant> 1 </integerConstant>
    </term>
  </expression>
  <symbol> ; </symbol>
</letStatement>
";
    assert_eq!(xml, expected);
}

#[test]
fn test_json_empty_class() {
    let class = parse("class Main { }").unwrap();
    let json = JsonEmitter.emit_tree(&class).unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "class": [
                { "keyword": "class" },
                { "identifier": "Main" },
                { "symbol": "{" },
                { "symbol": "}" }
            ]
        })
    );
    assert!(json.ends_with("}\n"));
}

#[test]
fn test_json_repeated_siblings_stay_ordered() {
    let class = parse(SOURCE).unwrap();
    let value: Value = serde_json::from_str(&JsonEmitter.emit_tree(&class).unwrap()).unwrap();

    let subroutine = &value["class"][3]["subroutineDec"];
    let body = &subroutine[6]["subroutineBody"];
    let statements = body[2]["statements"].as_array().unwrap();
    let labels: Vec<&str> = statements
        .iter()
        .map(|s| s.as_object().unwrap().keys().next().unwrap().as_str())
        .collect();
    assert_eq!(labels, ["letStatement", "letStatement", "doStatement", "returnStatement"]);

    assert_eq!(statements[0]["letStatement"][1]["identifier"], "a");
    assert_eq!(statements[1]["letStatement"][1]["identifier"], "b");
    assert_eq!(statements[2]["doStatement"][5]["expressionList"][0]["expression"][0]["term"][0]["stringConstant"], "x & y");
}

#[test]
fn test_rendering_is_deterministic() {
    let class = parse(SOURCE).unwrap();
    for format in [OutputFormat::Xml, OutputFormat::Json] {
        let emitter = format.emitter();
        let first = emitter.emit_tree(&class).unwrap();
        let second = emitter.emit_tree(&class).unwrap();
        assert_eq!(first, second);

        let reparsed = parse(SOURCE).unwrap();
        assert_eq!(emitter.emit_tree(&reparsed).unwrap(), first);
    }
}

#[test]
fn test_token_listings() {
    let tokens = tokenize("let s = \"a b\";").unwrap();

    let xml = XmlEmitter.emit_tokens(&tokens).unwrap();
    assert_eq!(
        xml,
        "<tokens>\n<keyword> let </keyword>\n<identifier> s </identifier>\n<symbol> = </symbol>\n<stringConstant> a b </stringConstant>\n<symbol> ; </symbol>\n</tokens>\n"
    );

    let value: Value = serde_json::from_str(&JsonEmitter.emit_tokens(&tokens).unwrap()).unwrap();
    assert_eq!(value["tokens"].as_array().unwrap().len(), 5);
    assert_eq!(value["tokens"][3]["stringConstant"], "a b");
}

#[test]
fn test_output_format_parsing() {
    assert_eq!("xml".parse::<OutputFormat>().unwrap(), OutputFormat::Xml);
    assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    assert!("yaml".parse::<OutputFormat>().is_err());
    assert_eq!(OutputFormat::Json.extension(), "json");
    assert_eq!(OutputFormat::default(), OutputFormat::Xml);
}
