//! Diesel schema for identity persistence.

diesel::table! {
    /// User accounts.
    identities (id) {
        /// Store-assigned identifier.
        id -> Int8,
        /// Unique login handle.
        #[max_length = 150]
        username -> Varchar,
        /// Given name.
        #[max_length = 150]
        first_name -> Varchar,
        /// Family name.
        #[max_length = 150]
        last_name -> Varchar,
        /// Contact email, possibly empty.
        #[max_length = 254]
        email -> Varchar,
        /// Staff flag.
        is_staff -> Bool,
        /// Active flag.
        is_active -> Bool,
        /// Encoded password hash.
        #[max_length = 255]
        password_hash -> Nullable<Varchar>,
        /// Join timestamp.
        date_joined -> Timestamptz,
    }
}
