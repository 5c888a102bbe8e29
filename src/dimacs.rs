use std::fs;

use nom::{IResult, error::Error};
use nom::branch::alt;
use nom::bytes::complete::{take, tag, take_until};
use nom::character::complete::digit1;


/// reads an instance from file, returns (n,m,adj_list)
pub fn read_from_file(filename:&str) -> (usize, usize, Vec<Vec<usize>>) {
    let content = fs::read_to_string(filename)
        .expect("dimacs: unable to read file").replace('\r', "");
    let after_comments = skip_comments(content.as_str()).unwrap().0;
    let (mut remaining,(n,m)) = read_header(after_comments).unwrap();
    let mut adj_list = vec![Vec::new(); n];
    let mut check_nb_edges = 0;
    while let Ok((rest,(a,b))) = read_edge(remaining) {
        remaining = rest;
        adj_list[a-1].push(b-1);
        adj_list[b-1].push(a-1);
        check_nb_edges += 1;
    }
    // some DIMACS files declare each edge once, some twice
    assert!(
        check_nb_edges == m || 2*check_nb_edges == m,
        "check: {}\t m: {}", check_nb_edges, m
    );
    (n, m, adj_list)
}

/// skips a single comment line
fn skip_comment(s:&str) -> IResult<&str, &str> {
    let (remaining,_) = tag("c")(s)?;
    let (remaining,_) = take_until("\n")(remaining)?;
    take(1usize)(remaining)
}

/// skips all comments
pub fn skip_comments(s:&str) -> IResult<&str, Vec<&str>> {
    nom::multi::many0(skip_comment)(s)
}

/// reads two integers separated by a single character, consuming the
/// end-of-line marker when there is one
fn read_two_integers(s:&str) -> IResult<&str, (usize,usize)> {
    let (remaining1,digits1) = digit1(s)?;
    let (remaining2,_) = take(1usize)(remaining1)?;
    let (remaining3,digits2) = digit1(remaining2)?;
    let pair = (
        digits1.parse::<usize>().unwrap(),
        digits2.parse::<usize>().unwrap(),
    );
    match tag::<&str,&str,Error<&str>>("\n")(remaining3) {
        Ok((remaining4,_)) => Ok((remaining4, pair)),
        Err(_) => Ok((remaining3, pair)),
    }
}

/// reads header containing (n,m)
pub fn read_header(s:&str) -> IResult<&str, (usize,usize)> {
    let (remaining,_) = alt((tag("p edge "), tag("p col ")))(s)?;
    read_two_integers(remaining)
}

/// reads edge line (WARNING: indices start at 1 in the DIMACS format)
pub fn read_edge(s:&str) -> IResult<&str, (usize,usize)> {
    let (remaining,_) = tag("e ")(s)?;
    read_two_integers(remaining)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_comments() {
        let s = "c this is a test comment\nc another one\np edge 2 1\ne 1 2";
        assert_eq!(
            skip_comments(s).unwrap().0,
            "p edge 2 1\ne 1 2"
        );
    }

    #[test]
    fn test_read_header() {
        let s = "p edge 2 1\ne 1 2";
        assert_eq!(read_header(s).unwrap().0, "e 1 2");
        assert_eq!(read_header(s).unwrap().1, (2,1));
    }

    #[test]
    fn test_read_header_col() {
        let s = "p col 2 1\ne 1 2";
        assert_eq!(read_header(s).unwrap().0, "e 1 2");
        assert_eq!(read_header(s).unwrap().1, (2,1));
    }

    #[test]
    fn test_read_edge() {
        let s = "e 1 2\n";
        assert_eq!(read_edge(s).unwrap().1, (1,2));
        assert_eq!(read_edge(s).unwrap().0, "");
    }

    #[test]
    fn test_read_edge_without_newline() {
        let s = "e 12 7";
        assert_eq!(read_edge(s).unwrap().1, (12,7));
        assert_eq!(read_edge(s).unwrap().0, "");
    }

    #[test]
    fn test_read_instance() {
        let (n,m,adj_list) = read_from_file("insts/grid2x2.col");
        assert_eq!(n, 4);
        assert_eq!(m, 4);
        assert_eq!(adj_list[0].len(), 2);
    }

    #[test]
    fn test_read_petersen() {
        let (n,m,adj_list) = read_from_file("insts/petersen.col");
        assert_eq!(n, 10);
        assert_eq!(m, 15);
        // the Petersen graph is 3-regular
        for l in &adj_list {
            assert_eq!(l.len(), 3);
        }
    }
}
