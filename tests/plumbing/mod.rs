mod cat_file;
