pub mod distinct;
pub mod longest_common_subsequence;
pub mod longest_increasing_subsequence;
pub mod mask;

// Re-export the subsequence engines with descriptive names
pub use distinct::{distinct_sorted, EnumerationMode};
pub use longest_common_subsequence::{
    all_lcs, all_lcs_with_matrix, all_unique_lcs, all_unique_lcs_with, build_lcs_matrix,
    lcs_length, number_of_lcs, LcsMatrix, LCS_OVERSAMPLE, NUMBER_OF_LCS_CAP,
};
pub use longest_increasing_subsequence::{
    all_lis, all_unique_lis, all_unique_lis_with, length_of_lis, number_of_lis, LIS_OVERSAMPLE,
};
pub use mask::Mask;
