diesel::table! {
    books (id) {
        id -> BigInt,
        isbn -> Nullable<Text>,
        title -> Text,
        author -> Text,
        publication_year -> Nullable<Integer>,
        status -> Text,
    }
}
