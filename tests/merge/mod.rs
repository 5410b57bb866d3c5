mod merge_with_conflicts;
mod merge_rejections;
mod merge_simple_divergence;
