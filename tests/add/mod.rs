mod add_directory_recursively;
mod add_unknown_file_fails;
