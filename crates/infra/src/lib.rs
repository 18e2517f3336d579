pub mod stars;
pub mod supabase;
