mod common;

use common::{add_question, test_pool};
use trivia_api::db::queries::categories::get_category_map;
use trivia_api::db::queries::questions::{
    delete_question, get_all_questions, get_question_by_id, get_questions_for_category,
    search_questions,
};

#[tokio::test]
async fn delete_reports_whether_a_row_was_removed() {
    let pool = test_pool().await;
    let id = add_question(&pool, "Short-lived", 1).await;

    assert!(delete_question(&pool, id).await.unwrap());
    assert!(!delete_question(&pool, id).await.unwrap());
    assert!(!delete_question(&pool, 12345).await.unwrap());
    assert_eq!(get_question_by_id(&pool, id).await.unwrap(), None);
}

#[tokio::test]
async fn questions_are_ordered_by_id() {
    let pool = test_pool().await;
    let ids = vec![
        add_question(&pool, "b", 1).await,
        add_question(&pool, "a", 1).await,
        add_question(&pool, "c", 2).await,
    ];
    let all: Vec<i64> = get_all_questions(&pool).await.unwrap().iter().map(|q| q.id).collect();
    assert_eq!(all, ids);

    let first: Vec<i64> = get_questions_for_category(&pool, 1)
        .await
        .unwrap()
        .iter()
        .map(|q| q.id)
        .collect();
    assert_eq!(first, ids[..2].to_vec());
}

#[tokio::test]
async fn category_ids_need_not_exist() {
    let pool = test_pool().await;
    let id = add_question(&pool, "Orphan", 404).await;

    assert!(!get_category_map(&pool).await.unwrap().contains_key(&404));
    assert_eq!(get_question_by_id(&pool, id).await.unwrap().unwrap().category, 404);
}

#[tokio::test]
async fn empty_search_term_matches_everything() {
    let pool = test_pool().await;
    add_question(&pool, "One", 1).await;
    add_question(&pool, "Two", 2).await;
    assert_eq!(search_questions(&pool, "").await.unwrap().len(), 2);
}
