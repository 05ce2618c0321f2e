mod global;
