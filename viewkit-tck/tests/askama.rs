mod common;

viewkit_tck::tck!(common::askama());
