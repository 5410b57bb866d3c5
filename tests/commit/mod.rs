mod commit_record_format;
mod commit_without_staged_files_fails;
