//! Integration tests for boolean queries over normalized documents

use std::sync::Arc;

use temu::analysis::{Normalizer, NormalizerConfig};
use temu::document::Document;
use temu::error::{Result, TemuError};
use temu::query::{BooleanExpr, BooleanQueryParser, BooleanSearcher, DocumentSetIndex};

fn searcher() -> BooleanSearcher {
    BooleanSearcher::new(Arc::new(Normalizer::new(NormalizerConfig::default()).unwrap()))
}

fn documents() -> Vec<Document> {
    Document::from_contents([
        "Ikan segar dimakan kucing",
        "Anjing berlari di taman",
        "Kucing dan anjing bermain bersama",
        "Burung terbang tinggi",
    ])
}

fn ids(query: &str) -> Result<Vec<usize>> {
    Ok(searcher()
        .search(query, &documents())?
        .iter()
        .map(|doc| doc.doc_id)
        .collect())
}

#[test]
fn test_terms_are_stemmed_like_documents() -> Result<()> {
    // "makan" matches "dimakan", "lari" matches "berlari"
    assert_eq!(ids("makan")?, vec![1]);
    assert_eq!(ids("lari")?, vec![2]);
    assert_eq!(ids("KUCING")?, vec![1, 3]);
    Ok(())
}

#[test]
fn test_operators() -> Result<()> {
    assert_eq!(ids("kucing AND anjing")?, vec![3]);
    assert_eq!(ids("kucing OR burung")?, vec![1, 3, 4]);
    assert_eq!(ids("kucing NOT anjing")?, vec![1]);
    assert_eq!(ids("NOT kucing")?, vec![2, 4]);
    assert_eq!(ids("NOT NOT kucing")?, vec![1, 3]);
    Ok(())
}

#[test]
fn test_left_to_right_without_precedence() -> Result<()> {
    // ((burung OR kucing) AND anjing)
    assert_eq!(ids("burung OR kucing AND anjing")?, vec![3]);
    // (burung OR (kucing AND anjing))
    assert_eq!(ids("burung OR (kucing AND anjing)")?, vec![3, 4]);
    Ok(())
}

#[test]
fn test_lenient_parsing() -> Result<()> {
    // a bare term where an operator is expected ends the query
    assert_eq!(ids("burung kucing")?, vec![4]);
    // a missing closing parenthesis is accepted
    assert_eq!(ids("(kucing AND anjing")?, vec![3]);
    // missing operands are empty
    assert_eq!(ids("")?, Vec::<usize>::new());
    assert_eq!(ids("kucing AND")?, Vec::<usize>::new());
    assert_eq!(ids("kucing OR")?, vec![1, 3]);
    Ok(())
}

#[test]
fn test_stopword_and_phrase_leaves_match_nothing() -> Result<()> {
    assert_eq!(ids("dan")?, Vec::<usize>::new());
    assert_eq!(ids("NOT dan")?, vec![1, 2, 3, 4]);
    Ok(())
}

#[test]
fn test_deep_nesting_is_rejected() {
    let query = format!("{}kucing{}", "(".repeat(1000), ")".repeat(1000));
    let err = ids(&query).unwrap_err();
    assert!(matches!(err, TemuError::BooleanQuery(_)));

    let query = format!("{}kucing", "NOT ".repeat(1000));
    assert!(matches!(ids(&query), Err(TemuError::BooleanQuery(_))));
}

#[test]
fn test_long_operator_chains_are_folded() -> Result<()> {
    let query = vec!["kucing"; 1000].join(" OR ");
    assert_eq!(ids(&query)?, vec![1, 3]);

    let query = format!("{} AND NOT ikan", vec!["kucing"; 10_000].join(" OR "));
    assert_eq!(ids(&query)?, vec![3]);

    let query = vec!["burung OR anjing"; 500].join(" AND ");
    assert_eq!(ids(&query)?, vec![2, 3, 4]);
    Ok(())
}

#[test]
fn test_moderate_nesting_is_accepted() -> Result<()> {
    let query = format!("{}kucing{}", "(".repeat(50), ")".repeat(50));
    assert_eq!(ids(&query)?, vec![1, 3]);
    Ok(())
}

#[test]
fn test_parse_then_evaluate() -> Result<()> {
    let normalizer = Normalizer::new(NormalizerConfig::default())?;
    let expr = BooleanQueryParser::new(&normalizer).parse("kucing AND NOT ikan")?;
    assert_eq!(
        expr,
        BooleanExpr::and(
            BooleanExpr::term("kucing"),
            BooleanExpr::not(BooleanExpr::term("ikan"))
        )
    );

    let index = DocumentSetIndex::build(&normalizer, &documents());
    assert_eq!(index.len(), 4);
    assert_eq!(expr.evaluate(&index).into_iter().collect::<Vec<_>>(), vec![2]);
    Ok(())
}
